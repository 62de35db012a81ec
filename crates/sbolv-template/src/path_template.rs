//! Path strings with embedded `{...}` expressions.

use log::trace;

use crate::{
    error::ExpressionError,
    expression::{Expression, Parameters},
};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Expression(Expression),
}

/// A path-data template whose `{...}` regions are compiled once and
/// evaluated many times.
///
/// Braces must balance and may not nest. Text outside braces is copied
/// through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let unbalanced = || ExpressionError::UnbalancedBraces {
            template: source.to_string(),
        };

        let mut segments = Vec::new();
        let mut rest = source;
        while !rest.is_empty() {
            let Some(open) = rest.find(['{', '}']) else {
                segments.push(Segment::Literal(rest.to_string()));
                break;
            };
            if rest[open..].starts_with('}') {
                return Err(unbalanced());
            }
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }

            let body = &rest[open + 1..];
            let close = body.find(['{', '}']).ok_or_else(unbalanced)?;
            if body[close..].starts_with('{') {
                return Err(unbalanced());
            }
            segments.push(Segment::Expression(Expression::parse(&body[..close])?));
            rest = &body[close + 1..];
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled expressions in source order
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Expression(expression) => Some(expression),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes every expression with its value.
    pub fn render(&self, params: &Parameters) -> Result<String, ExpressionError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expression(expression) => {
                    // `+ 0.0` folds negative zero into zero
                    let value = expression.eval(params)? + 0.0;
                    out.push_str(&value.to_string());
                }
            }
        }
        trace!(template = self.source.as_str(), rendered = out.as_str(); "Rendered path template");
        Ok(out)
    }
}

/// Parses `template` and renders it in one step.
pub fn evaluate(template: &str, params: &Parameters) -> Result<String, ExpressionError> {
    PathTemplate::parse(template)?.render(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, f64)]) -> Parameters {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_evaluate_baseline() {
        let d = evaluate(
            "M {baseline_x} {baseline_y} L {baseline_x+width} {baseline_y}",
            &params(&[("baseline_x", 0.0), ("baseline_y", 0.0), ("width", 30.0)]),
        )
        .unwrap();
        assert_eq!(d, "M 0 0 L 30 0");
    }

    #[test]
    fn test_evaluate_fractional_and_negative() {
        let d = evaluate("M {a/4} {0-a}", &params(&[("a", 3.0)])).unwrap();
        assert_eq!(d, "M 0.75 -3");
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        let d = evaluate("{-x}", &params(&[("x", 0.0)])).unwrap();
        assert_eq!(d, "0");
    }

    #[test]
    fn test_literal_only() {
        let template = PathTemplate::parse("M 0 0 Z").unwrap();
        assert_eq!(template.expressions().count(), 0);
        assert_eq!(template.render(&Parameters::new()).unwrap(), "M 0 0 Z");
    }

    #[test]
    fn test_unbalanced_braces() {
        for source in ["M {x", "M x}", "M {x{y}}", "}{"] {
            let err = PathTemplate::parse(source).unwrap_err();
            assert!(
                matches!(err, ExpressionError::UnbalancedBraces { .. }),
                "expected unbalanced braces for `{source}`, got {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_region_is_syntax_error() {
        let err = PathTemplate::parse("M {} 0").unwrap_err();
        assert!(matches!(err, ExpressionError::Syntax { .. }));
    }

    #[test]
    fn test_unknown_parameter_propagates() {
        let err = evaluate("M {missing} 0", &Parameters::new()).unwrap_err();
        assert!(matches!(err, ExpressionError::UnknownVariable { name, .. } if name == "missing"));
    }

    #[test]
    fn test_compiled_template_is_reusable() {
        let template = PathTemplate::parse("L {x*2} 0").unwrap();
        assert_eq!(template.render(&params(&[("x", 1.0)])).unwrap(), "L 2 0");
        assert_eq!(template.render(&params(&[("x", 4.5)])).unwrap(), "L 9 0");
        assert_eq!(template.source(), "L {x*2} 0");
    }
}
