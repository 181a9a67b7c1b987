// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule-table evaluation shared by the symbology tables.

use seachart_feature::{Attributes, Feature};

/// Attribute predicate attached to a rule.
///
/// Missing attributes compare as the empty string, except where a variant
/// names its own default.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Condition {
    /// Always holds.
    Always,
    /// The attribute equals the given value.
    Is(u16, &'static str),
    /// The attribute equals one of the given values.
    OneOf(u16, &'static [&'static str]),
    /// The attribute, parsed as a number (missing or unparsable counts as
    /// `0`), is at least the given value.
    AtLeast(u16, f64),
    /// The attribute parses as a number strictly greater than the value.
    Above(u16, f64),
    /// The attribute parses as a number.
    Numeric(u16),
    /// Every nested condition holds.
    All(&'static [Self]),
}

impl Condition {
    pub(crate) fn holds(&self, attributes: &Attributes) -> bool {
        match *self {
            Self::Always => true,
            Self::Is(code, value) => attributes.get_or(code, "") == value,
            Self::OneOf(code, values) => values.contains(&attributes.get_or(code, "")),
            Self::AtLeast(code, value) => attributes.number(code).unwrap_or(0.0) >= value,
            Self::Above(code, value) => attributes.number(code).is_some_and(|n| n > value),
            Self::Numeric(code) => attributes.number(code).is_some(),
            Self::All(conditions) => conditions.iter().all(|c| c.holds(attributes)),
        }
    }
}

/// One row of a decision table.
#[derive(Debug)]
pub(crate) struct Rule<T: 'static> {
    pub(crate) classes: &'static [u16],
    pub(crate) when: Condition,
    pub(crate) then: T,
}

impl<T> Rule<T> {
    pub(crate) const fn new(classes: &'static [u16], when: Condition, then: T) -> Self {
        Self {
            classes,
            when,
            then,
        }
    }
}

/// Returns the outcome of the first rule matching the feature's class and
/// attributes.
pub(crate) fn first_match<'a, T>(rules: &'a [Rule<T>], feature: &Feature) -> Option<&'a T> {
    let class = feature.class();
    rules
        .iter()
        .find(|r| r.classes.contains(&class) && r.when.holds(feature.attributes()))
        .map(|r| &r.then)
}

/// Returns `true` if any rule lists the feature's class.
pub(crate) fn covers_class<T>(rules: &[Rule<T>], feature: &Feature) -> bool {
    let class = feature.class();
    rules.iter().any(|r| r.classes.contains(&class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seachart_feature::{FeatureBuilder, Primitive};

    static RULES: &[Rule<u8>] = &[
        Rule::new(&[1], Condition::Is(10, "a"), 1),
        Rule::new(&[1, 2], Condition::AtLeast(11, 5.0), 2),
        Rule::new(&[1, 2], Condition::Always, 3),
    ];

    fn feature(class: u16, attrs: &[(u16, &str)]) -> Feature {
        FeatureBuilder::new(1, class, Primitive::Point)
            .attributes(attrs.iter().copied().collect())
            .build()
    }

    #[test]
    fn first_matching_rule_wins() {
        let f = feature(1, &[(10, "a"), (11, "9")]);
        assert_eq!(first_match(RULES, &f), Some(&1));
        let f = feature(1, &[(10, "b"), (11, "9")]);
        assert_eq!(first_match(RULES, &f), Some(&2));
        let f = feature(2, &[]);
        assert_eq!(first_match(RULES, &f), Some(&3));
    }

    #[test]
    fn unknown_class_matches_nothing() {
        let f = feature(3, &[(10, "a")]);
        assert_eq!(first_match(RULES, &f), None);
        assert!(!covers_class(RULES, &f));
    }

    #[test]
    fn numeric_conditions() {
        let attrs: Attributes = [(1, "20"), (2, "20.5"), (3, "deep")].into_iter().collect();
        assert!(!Condition::Above(1, 20.0).holds(&attrs));
        assert!(Condition::Above(2, 20.0).holds(&attrs));
        assert!(!Condition::Numeric(3).holds(&attrs));
        assert!(!Condition::AtLeast(3, 1.0).holds(&attrs));
        assert!(Condition::AtLeast(4, 0.0).holds(&attrs));
        assert!(Condition::All(&[Condition::Numeric(1), Condition::Numeric(2)]).holds(&attrs));
    }
}
