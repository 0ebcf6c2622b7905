//! Operator tags and the predicates they produce.
//!
//! Every `(column, value, operator)` triple maps to exactly one [`Predicate`]:
//!
//! | tag        | predicate                                        |
//! |------------|--------------------------------------------------|
//! | `""`       | `IN` for sequences, `=` otherwise                |
//! | `e`        | `=`                                              |
//! | `ne`       | `<>`                                             |
//! | `gt` `gte` | `>` `>=`                                         |
//! | `lt` `lte` | `<` `<=`                                         |
//! | `in`       | `IN`; an empty sequence becomes `IS NULL`        |
//! | `notin`    | `NOT IN`                                         |
//! | `like`     | `LIKE`                                           |
//! | `notlike`  | `NOT LIKE`                                       |

use std::fmt;
use std::str::FromStr;

use crate::error::OrmError;
use crate::sql::Sql;
use crate::value::Value;

/// Operator tag of a field or key/value entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// No tag: decided by the value's shape.
    #[default]
    Auto,
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
}

impl Operator {
    pub const ALL: [Operator; 11] = [
        Operator::Auto,
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::NotIn,
        Operator::Like,
        Operator::NotLike,
    ];

    /// The tag spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Auto => "",
            Operator::Eq => "e",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "notin",
            Operator::Like => "like",
            Operator::NotLike => "notlike",
        }
    }

    /// Build the predicate this operator produces for `column` and `value`.
    pub fn apply(self, column: impl Into<String>, value: Value) -> Predicate {
        let column = column.into();
        let op = match self {
            Operator::Auto if value.kind().is_sequence() => {
                return Predicate::In {
                    column,
                    values: value.into_list(),
                };
            }
            Operator::In => {
                let values = value.into_list();
                return if values.is_empty() {
                    Predicate::IsNull { column }
                } else {
                    Predicate::In { column, values }
                };
            }
            Operator::NotIn => {
                return Predicate::NotIn {
                    column,
                    values: value.into_list(),
                };
            }
            Operator::Auto | Operator::Eq => Comparison::Eq,
            Operator::Ne => Comparison::Ne,
            Operator::Gt => Comparison::Gt,
            Operator::Gte => Comparison::Gte,
            Operator::Lt => Comparison::Lt,
            Operator::Lte => Comparison::Lte,
            Operator::Like => Comparison::Like,
            Operator::NotLike => Comparison::NotLike,
        };
        Predicate::Compare { column, op, value }
    }
}

impl FromStr for Operator {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| OrmError::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary comparison rendered as `column <op> $n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
}

impl Comparison {
    pub fn sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Like => "LIKE",
            Comparison::NotLike => "NOT LIKE",
        }
    }
}

/// One WHERE fragment. A statement ANDs all of its predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: String,
        op: Comparison,
        value: Value,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    NotIn {
        column: String,
        values: Vec<Value>,
    },
    IsNull {
        column: String,
    },
}

impl Predicate {
    /// `column = value`
    pub fn eq(column: impl Into<String>, value: Value) -> Self {
        Predicate::Compare {
            column: column.into(),
            op: Comparison::Eq,
            value,
        }
    }

    /// `column IN (values...)`
    pub fn in_list(column: impl Into<String>, values: Vec<Value>) -> Self {
        Predicate::In {
            column: column.into(),
            values,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Predicate::Compare { column, .. }
            | Predicate::In { column, .. }
            | Predicate::NotIn { column, .. }
            | Predicate::IsNull { column } => column,
        }
    }

    /// Append this predicate to `sql`, binding its values.
    ///
    /// An empty `IN` list renders as `1=0` and an empty `NOT IN` list as `1=1`.
    pub fn append_to_sql(&self, sql: &mut Sql) {
        match self {
            Predicate::Compare { column, op, value } => {
                sql.push(column)
                    .push(" ")
                    .push(op.sql())
                    .push(" ")
                    .push_bind(value.clone());
            }
            Predicate::In { values, .. } if values.is_empty() => {
                sql.push("1=0");
            }
            Predicate::NotIn { values, .. } if values.is_empty() => {
                sql.push("1=1");
            }
            Predicate::In { column, values } => {
                sql.push(column)
                    .push(" IN (")
                    .push_bind_list(values.iter().cloned())
                    .push(")");
            }
            Predicate::NotIn { column, values } => {
                sql.push(column)
                    .push(" NOT IN (")
                    .push_bind_list(values.iter().cloned())
                    .push(")");
            }
            Predicate::IsNull { column } => {
                sql.push(column).push(" IS NULL");
            }
        }
    }

    /// Render this predicate alone.
    pub fn to_sql(&self) -> Sql {
        let mut sql = Sql::empty();
        self.append_to_sql(&mut sql);
        sql
    }
}

/// Append the predicate for `(column, value, tag)` to `dst`.
///
/// An unknown tag appends nothing.
pub fn append_predicate(dst: &mut Vec<Predicate>, column: &str, value: Value, tag: &str) {
    match tag.parse::<Operator>() {
        Ok(op) => dst.push(op.apply(column, value)),
        Err(_) => {
            tracing::warn!(target: "ormx", column, tag, "unknown operator tag, condition skipped");
        }
    }
}

/// Render predicates joined by `AND` into `sql`. No-op when empty.
pub fn push_where(sql: &mut Sql, predicates: &[Predicate]) {
    if predicates.is_empty() {
        return;
    }
    sql.push(" WHERE ");
    sql.push_joined(predicates, " AND ", |sql, p| p.append_to_sql(sql));
}
