use crate::value::Value;
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    /// Text starts with the operand.
    Prefix,
    /// Text ends with the operand.
    Suffix,
}

impl CompareOp {
    /// Whether the operator takes a list of operands.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

///
/// Operand
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operand {
    Single(Value),
    List(Vec<Value>),
}

impl Operand {
    /// Raw operand values in order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::Single(v) => vec![v.clone()],
            Self::List(vs) => vs.clone(),
        }
    }
}

///
/// Comparison
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comparison {
    pub op: CompareOp,
    pub operand: Operand,
}

///
/// Selectable
///
/// Leaf predicate: one `entity.field` comparison. Applying an operator
/// replaces whatever comparison was applied before.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selectable {
    pub entity: String,
    pub field: String,
    pub comparison: Option<Comparison>,
}

impl Selectable {
    pub fn new(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            field: field.into(),
            comparison: None,
        }
    }

    fn compare(mut self, op: CompareOp, operand: Operand) -> Self {
        self.comparison = Some(Comparison { op, operand });
        self
    }

    fn single(self, op: CompareOp, value: impl Into<Value>) -> Self {
        self.compare(op, Operand::Single(value.into()))
    }

    fn list<I, V>(self, op: CompareOp, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.compare(
            op,
            Operand::List(values.into_iter().map(Into::into).collect()),
        )
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Ne, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Lte, value)
    }

    #[must_use]
    pub fn prefix(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Prefix, value)
    }

    #[must_use]
    pub fn suffix(self, value: impl Into<Value>) -> Self {
        self.single(CompareOp::Suffix, value)
    }

    #[must_use]
    pub fn in_list<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.list(CompareOp::In, values)
    }

    #[must_use]
    pub fn not_in_list<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.list(CompareOp::NotIn, values)
    }

    /// Raw operands of the applied comparison.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.comparison
            .as_ref()
            .map(|c| c.operand.values())
            .unwrap_or_default()
    }
}

///
/// ConnectiveOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectiveOp {
    And,
    Or,
}

impl fmt::Display for ConnectiveOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

///
/// Connective
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Connective {
    pub op: ConnectiveOp,
    pub operands: Vec<Predicate>,
}

impl Connective {
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.operands.iter().flat_map(Predicate::values).collect()
    }
}

/// AND-group over any mix of leaves and nested groups.
pub fn and<I, P>(operands: I) -> Connective
where
    I: IntoIterator<Item = P>,
    P: Into<Predicate>,
{
    Connective {
        op: ConnectiveOp::And,
        operands: operands.into_iter().map(Into::into).collect(),
    }
}

/// OR-group over any mix of leaves and nested groups.
pub fn or<I, P>(operands: I) -> Connective
where
    I: IntoIterator<Item = P>,
    P: Into<Predicate>,
{
    Connective {
        op: ConnectiveOp::Or,
        operands: operands.into_iter().map(Into::into).collect(),
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    Selectable(Selectable),
    Connective(Connective),
}

impl Predicate {
    /// Raw operands of every leaf, left to right.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::Selectable(s) => s.values(),
            Self::Connective(c) => c.values(),
        }
    }

    /// Number of leaf comparisons in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Selectable(_) => 1,
            Self::Connective(c) => c.operands.iter().map(Self::leaf_count).sum(),
        }
    }
}

impl From<Selectable> for Predicate {
    fn from(s: Selectable) -> Self {
        Self::Selectable(s)
    }
}

impl From<Connective> for Predicate {
    fn from(c: Connective) -> Self {
        Self::Connective(c)
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        and([self, rhs]).into()
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        or([self, rhs]).into()
    }
}
