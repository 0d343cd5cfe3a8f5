//! Copyright © 2025-2026 Dunimd Team. All Rights Reserved.
//!
//! This file is part of Vista.
//! The Vista project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Vista Expression Module
//!
//! A small boolean/value expression tree that compiles to primitive
//! operation fragments, plus [`StageFilter`], the sum type filter-style
//! stages accept (a structured expression or an already-compiled raw
//! fragment).
//!
//! ## Scope prefixes
//!
//! Free field references in an expression resolve against a *scope prefix*
//! supplied at compile time. With no prefix, `field("a")` renders `"$a"`
//! (document scope). With prefix `"$preds"` it renders `"$preds.a"`
//! (field scope), and with prefix `"$$this"` it renders `"$$this.a"`
//! (one evaluation per list element). Filter-style stages choose the
//! prefix; using the wrong one silently filters the wrong scope, so the
//! rule lives in exactly one place: [`Expression::to_ops`].

use serde_json::{json, Value};

use crate::errors::{Result, VistaError};

/// Comparison operators understood by the backend expression language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    fn tag(self) -> &'static str {
        match self {
            CompareOp::Eq => "$eq",
            CompareOp::Ne => "$ne",
            CompareOp::Gt => "$gt",
            CompareOp::Gte => "$gte",
            CompareOp::Lt => "$lt",
            CompareOp::Lte => "$lte",
        }
    }
}

/// Structured boolean/value expression over record fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// Reference to a field, relative to the compile-time scope. An empty
    /// name refers to the scope itself.
    Field(String),
    /// Literal JSON value.
    Literal(Value),
    Compare(CompareOp, Box<Expression>, Box<Expression>),
    IsIn(Box<Expression>, Vec<Value>),
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    /// Reference to a field relative to the evaluation scope.
    pub fn field(name: impl Into<String>) -> Self {
        Expression::Field(name.into())
    }

    /// The evaluation scope itself (the whole document, or the current
    /// list element under an element-scoped prefix).
    pub fn this() -> Self {
        Expression::Field(String::new())
    }

    /// Literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn eq(self, rhs: impl Into<Expression>) -> Self {
        self.compare(CompareOp::Eq, rhs)
    }

    pub fn ne(self, rhs: impl Into<Expression>) -> Self {
        self.compare(CompareOp::Ne, rhs)
    }

    pub fn gt(self, rhs: impl Into<Expression>) -> Self {
        self.compare(CompareOp::Gt, rhs)
    }

    pub fn gte(self, rhs: impl Into<Expression>) -> Self {
        self.compare(CompareOp::Gte, rhs)
    }

    pub fn lt(self, rhs: impl Into<Expression>) -> Self {
        self.compare(CompareOp::Lt, rhs)
    }

    pub fn lte(self, rhs: impl Into<Expression>) -> Self {
        self.compare(CompareOp::Lte, rhs)
    }

    /// Membership test against a fixed value set.
    pub fn is_in(self, values: impl IntoIterator<Item = Value>) -> Self {
        Expression::IsIn(Box::new(self), values.into_iter().collect())
    }

    pub fn and(self, rhs: Expression) -> Self {
        match self {
            Expression::And(mut items) => {
                items.push(rhs);
                Expression::And(items)
            }
            lhs => Expression::And(vec![lhs, rhs]),
        }
    }

    pub fn or(self, rhs: Expression) -> Self {
        match self {
            Expression::Or(mut items) => {
                items.push(rhs);
                Expression::Or(items)
            }
            lhs => Expression::Or(vec![lhs, rhs]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Expression::Not(Box::new(self))
    }

    fn compare(self, op: CompareOp, rhs: impl Into<Expression>) -> Self {
        Expression::Compare(op, Box::new(self), Box::new(rhs.into()))
    }

    /// Compiles the expression to a primitive operation fragment, binding
    /// free field references under `prefix`.
    pub fn to_ops(&self, prefix: Option<&str>) -> Value {
        match self {
            Expression::Field(name) => match prefix {
                Some(scope) if name.is_empty() => Value::String(scope.to_string()),
                Some(scope) => Value::String(format!("{scope}.{name}")),
                None => Value::String(format!("${name}")),
            },
            Expression::Literal(value) => value.clone(),
            Expression::Compare(op, lhs, rhs) => {
                json!({ op.tag(): [lhs.to_ops(prefix), rhs.to_ops(prefix)] })
            }
            Expression::IsIn(item, values) => {
                json!({ "$in": [item.to_ops(prefix), values] })
            }
            Expression::And(items) => {
                let items: Vec<Value> = items.iter().map(|e| e.to_ops(prefix)).collect();
                json!({ "$and": items })
            }
            Expression::Or(items) => {
                let items: Vec<Value> = items.iter().map(|e| e.to_ops(prefix)).collect();
                json!({ "$or": items })
            }
            Expression::Not(inner) => json!({ "$not": [inner.to_ops(prefix)] }),
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Literal(Value::from(value))
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::Literal(Value::from(value))
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Literal(Value::from(value))
    }
}

/// Filter parameter accepted by filter-style stages: either a structured
/// [`Expression`] or a pre-built raw fragment used verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct StageFilter(FilterInner);

#[derive(Clone, Debug, PartialEq)]
enum FilterInner {
    Expression(Expression),
    Fragment(Value),
}

impl StageFilter {
    /// Wraps an already-compiled fragment. The fragment must be a JSON
    /// object; anything else is rejected here rather than at compile time.
    pub fn fragment(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(VistaError::construction(format!(
                "filter must be an expression or an operation fragment; found {value}"
            )));
        }
        Ok(StageFilter(FilterInner::Fragment(value)))
    }

    /// Whether this filter is a structured expression (as opposed to a raw
    /// fragment). Match-style stages wrap expressions in `$expr`.
    pub fn is_expression(&self) -> bool {
        matches!(self.0, FilterInner::Expression(_))
    }

    /// Compiles the filter under the given scope prefix. Raw fragments are
    /// returned verbatim; their scope is the caller's responsibility.
    pub fn to_ops(&self, prefix: Option<&str>) -> Value {
        match &self.0 {
            FilterInner::Expression(expr) => expr.to_ops(prefix),
            FilterInner::Fragment(value) => value.clone(),
        }
    }
}

impl From<Expression> for StageFilter {
    fn from(expr: Expression) -> Self {
        StageFilter(FilterInner::Expression(expr))
    }
}
