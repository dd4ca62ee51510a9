use crate::{
    error::Error,
    predicate::{CompareOp, Connective, Operand, Predicate, Selectable},
    value::Value,
};

///
/// Translation
///
/// Rendered predicate text and its positional parameters, in the order the
/// placeholders appear in `text`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Translation {
    pub text: String,
    pub params: Vec<Value>,
}

impl Translation {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

///
/// Translator
///
/// Dialect hooks used while rendering a predicate tree. Every hook has the
/// standard behavior as its default, which matches MySQL: LIKE operands
/// are backslash-escaped and no ESCAPE clause is rendered.
///

pub trait Translator: Send + Sync {
    fn operator(&self, op: CompareOp) -> &'static str {
        match op {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::In => "IN",
            CompareOp::NotIn => "NOT IN",
            CompareOp::Prefix | CompareOp::Suffix => "LIKE",
        }
    }

    fn entity(&self, entity: &str) -> String {
        entity.to_string()
    }

    fn field(&self, _entity: &str, field: &str) -> String {
        field.to_string()
    }

    /// Placeholder for the parameter at 1-based `position`.
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    /// Escape LIKE wildcards so the operand only matches literally.
    fn escape_like(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            if matches!(c, '\\' | '%' | '_') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    /// Appended after a LIKE placeholder. Empty for engines whose LIKE
    /// already treats backslash as the escape character.
    fn escape_clause(&self) -> &'static str {
        ""
    }
}

///
/// StandardTranslator
///

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTranslator;

impl Translator for StandardTranslator {}

/// Render a list of top-level predicates, implicitly AND-joined.
///
/// An empty list renders empty text; the caller omits the WHERE clause.
pub fn translate<T>(translator: &T, predicates: &[Predicate]) -> Result<Translation, Error>
where
    T: Translator + ?Sized,
{
    let mut walk = Walk {
        translator,
        params: Vec::new(),
    };

    let mut parts = Vec::with_capacity(predicates.len());
    for predicate in predicates {
        let rendered = walk.predicate(predicate)?;
        if !rendered.is_empty() {
            parts.push(rendered);
        }
    }

    Ok(Translation {
        text: parts.join(" AND "),
        params: walk.params,
    })
}

///
/// Walk
///

struct Walk<'t, T: ?Sized> {
    translator: &'t T,
    params: Vec<Value>,
}

impl<T: Translator + ?Sized> Walk<'_, T> {
    fn predicate(&mut self, predicate: &Predicate) -> Result<String, Error> {
        match predicate {
            Predicate::Selectable(s) => self.selectable(s),
            Predicate::Connective(c) => self.connective(c),
        }
    }

    fn connective(&mut self, connective: &Connective) -> Result<String, Error> {
        let mut parts = Vec::with_capacity(connective.operands.len());
        for operand in &connective.operands {
            let rendered = self.predicate(operand)?;
            if !rendered.is_empty() {
                parts.push(rendered);
            }
        }

        if parts.is_empty() {
            return Ok(String::new());
        }

        Ok(format!(
            "({})",
            parts.join(&format!(" {} ", connective.op))
        ))
    }

    fn selectable(&mut self, s: &Selectable) -> Result<String, Error> {
        let Some(comparison) = &s.comparison else {
            return Err(Error::predicate_invariant(format!(
                "no comparison applied to '{}.{}'",
                s.entity, s.field
            )));
        };

        let t = self.translator;
        let column = format!("{}.{}", t.entity(&s.entity), t.field(&s.entity, &s.field));
        let op = t.operator(comparison.op);

        match (comparison.op, &comparison.operand) {
            (CompareOp::In | CompareOp::NotIn, operand) => {
                let values = operand.values();
                if values.is_empty() {
                    return Err(Error::predicate_invariant(format!(
                        "empty {op} list for '{}.{}'",
                        s.entity, s.field
                    )));
                }

                let placeholders = values
                    .into_iter()
                    .map(|v| self.bind(v))
                    .collect::<Vec<_>>();

                Ok(format!("{column} {op} ({})", placeholders.join(", ")))
            }
            (CompareOp::Prefix, Operand::Single(v)) => {
                let pattern = format!("{}%", t.escape_like(&v.to_string()));
                let placeholder = self.bind(Value::Text(pattern));

                Ok(format!("{column} {op} {placeholder}{}", t.escape_clause()))
            }
            (CompareOp::Suffix, Operand::Single(v)) => {
                let pattern = format!("%{}", t.escape_like(&v.to_string()));
                let placeholder = self.bind(Value::Text(pattern));

                Ok(format!("{column} {op} {placeholder}{}", t.escape_clause()))
            }
            (_, Operand::Single(v)) => Ok(format!("{column} {op} {}", self.bind(v.clone()))),
            (_, Operand::List(_)) => Err(Error::predicate_invariant(format!(
                "operator {op} on '{}.{}' takes a single operand",
                s.entity, s.field
            ))),
        }
    }

    fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.translator.placeholder(self.params.len())
    }
}
