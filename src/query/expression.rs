//! Predicate list of a query.

use super::ExpressionList;
use crate::error::QueryError;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_query::Value;

/// `?` or `?N` bind placeholders in a filter expression
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\?(\d+)?").expect("placeholder regex is valid"));

/// Quoted literals and identifiers, with doubled quotes as escapes
static QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"'(?:[^']|'')*'|"(?:[^"]|"")*""#).expect("quoted span regex is valid")
});

/// A single recorded predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Eq { path: String, value: Value },
    Ne { path: String, value: Value },
    /// Not-exists sub-query on a to-many path
    IsEmpty { path: String },
    /// Exists sub-query on a to-many path
    IsNotEmpty { path: String },
    /// Unparsed expression text with its bind values
    Raw { expression: String, params: Vec<Value> },
}

/// Filter applied to the rows fetched for a to-many path
#[derive(Debug, Clone)]
pub struct FilterMany {
    pub path: String,
    pub filter: Expressions,
}

/// Ordered list of predicates, joined with AND by the engine
///
/// Predicates are only ever appended; nothing is merged or cancelled, so
/// `is_empty` followed by `is_not_empty` on one path records two predicates.
/// Filters on to-many paths are kept apart from the predicates, one list per
/// path in first-use order.
#[derive(Debug, Clone, Default)]
pub struct Expressions {
    items: Vec<Expression>,
    filters: Vec<FilterMany>,
}

impl Expressions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.items
    }

    pub fn filters(&self) -> &[FilterMany] {
        &self.filters
    }

    /// Append an unparsed expression
    pub fn raw(&mut self, expression: &str, params: Vec<Value>) -> &mut Self {
        self.items.push(Expression::Raw {
            expression: expression.to_string(),
            params,
        });
        self
    }

    /// The filter list registered for `path`, if any
    pub fn filter_many_of(&self, path: &str) -> Option<&Expressions> {
        self.filters
            .iter()
            .find(|f| f.path == path)
            .map(|f| &f.filter)
    }

    /// Check every raw expression's placeholders against its bind values
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::FilterExpression`] naming the owning path when
    /// positional and indexed placeholders are mixed, when the positional
    /// count differs from the value count, or when an index is out of range.
    pub fn validate(&self) -> Result<(), QueryError> {
        self.validate_under("")
    }

    fn validate_under(&self, path: &str) -> Result<(), QueryError> {
        for item in &self.items {
            if let Expression::Raw { expression, params } = item {
                check_placeholders(expression, params.len()).map_err(|message| {
                    QueryError::FilterExpression {
                        path: path.to_string(),
                        message,
                    }
                })?;
            }
        }
        for filter in &self.filters {
            filter.filter.validate_under(&filter.path)?;
        }
        Ok(())
    }
}

fn check_placeholders(expression: &str, param_count: usize) -> Result<(), String> {
    let mut positional = 0usize;
    let mut indexed = Vec::new();

    let unquoted = QUOTED.replace_all(expression, "");
    for caps in PLACEHOLDER.captures_iter(&unquoted) {
        match caps.get(1) {
            Some(digits) => {
                let index = digits
                    .as_str()
                    .parse::<usize>()
                    .map_err(|e| format!("bad placeholder `?{}`: {e}", digits.as_str()))?;
                indexed.push(index);
            }
            None => positional += 1,
        }
    }

    if positional > 0 && !indexed.is_empty() {
        return Err(format!(
            "`{expression}` mixes positional `?` and indexed `?N` placeholders"
        ));
    }
    if positional > 0 && positional != param_count {
        return Err(format!(
            "`{expression}` has {positional} placeholders but {param_count} bind values"
        ));
    }
    if let Some(index) = indexed.iter().find(|&&i| i == 0 || i > param_count) {
        return Err(format!(
            "`{expression}` references ?{index} but only {param_count} bind values were given"
        ));
    }
    if positional == 0 && indexed.is_empty() && param_count > 0 {
        return Err(format!(
            "`{expression}` has no placeholders but {param_count} bind values"
        ));
    }
    Ok(())
}

impl ExpressionList for Expressions {
    fn eq(&mut self, path: &str, value: Value) {
        self.items.push(Expression::Eq {
            path: path.to_string(),
            value,
        });
    }

    fn ne(&mut self, path: &str, value: Value) {
        self.items.push(Expression::Ne {
            path: path.to_string(),
            value,
        });
    }

    fn filter_many(&mut self, path: &str) -> &mut Self {
        let index = match self.filters.iter().position(|f| f.path == path) {
            Some(index) => index,
            None => {
                self.filters.push(FilterMany {
                    path: path.to_string(),
                    filter: Expressions::new(),
                });
                self.filters.len() - 1
            }
        };
        &mut self.filters[index].filter
    }

    fn add_all(&mut self, other: Self) {
        self.items.extend(other.items);
        for filter in other.filters {
            self.filter_many(&filter.path).add_all(filter.filter);
        }
    }

    fn filter_many_expr(&mut self, path: &str, expression: &str, params: Vec<Value>) {
        self.filter_many(path).raw(expression, params);
    }

    fn is_empty(&mut self, path: &str) {
        self.items.push(Expression::IsEmpty {
            path: path.to_string(),
        });
    }

    fn is_not_empty(&mut self, path: &str) {
        self.items.push(Expression::IsNotEmpty {
            path: path.to_string(),
        });
    }
}
