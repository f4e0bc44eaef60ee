use crate::visitor::VisitorAttributes;

/// A named predicate and the outcome it selects.
///
/// Classifiers are ordered slices of rules: the first rule whose predicate
/// holds decides the outcome and later rules are never evaluated.
#[derive(Clone, Copy)]
pub struct Rule<T> {
    pub name: &'static str,
    pub when: fn(&VisitorAttributes) -> bool,
    pub then: T,
}

impl<T> std::fmt::Debug for Rule<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("then", &self.then)
            .finish()
    }
}

/// The first rule that applies, if any.
pub fn matching_rule<'a, T>(rules: &'a [Rule<T>], attrs: &VisitorAttributes) -> Option<&'a Rule<T>> {
    rules.iter().find(|rule| (rule.when)(attrs))
}

/// Outcome of the first applicable rule, or `fallback` when none applies.
pub fn first_match<T: Copy>(rules: &[Rule<T>], attrs: &VisitorAttributes, fallback: T) -> T {
    matching_rule(rules, attrs)
        .map(|rule| rule.then)
        .unwrap_or(fallback)
}
