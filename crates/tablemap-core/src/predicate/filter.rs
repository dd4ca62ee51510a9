use crate::{
    error::Error,
    predicate::{Predicate, StandardTranslator, Translation, Translator, translate},
    value::Value,
};
use derive_more::{Deref, IntoIterator};

///
/// Filter
///
/// Ordered list of top-level predicates, implicitly AND-joined.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct Filter(Vec<Predicate>);

impl Filter {
    pub fn new<I, P>(predicates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        Self(predicates.into_iter().map(Into::into).collect())
    }

    /// Append one more top-level predicate.
    pub fn push(&mut self, predicate: impl Into<Predicate>) {
        self.0.push(predicate.into());
    }

    /// Raw operands of every leaf in render order, without rendering.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.0.iter().flat_map(Predicate::values).collect()
    }

    /// Render through the standard translator.
    pub fn to_sql(&self) -> Result<Translation, Error> {
        self.translate(&StandardTranslator)
    }

    pub fn translate<T: Translator + ?Sized>(&self, translator: &T) -> Result<Translation, Error> {
        translate(translator, &self.0)
    }
}

impl<P: Into<Predicate>> FromIterator<P> for Filter {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}
