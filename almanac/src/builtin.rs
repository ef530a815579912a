//! Built-in sets of holidays, embedded from the tables in `almanac/data/`.

use std::sync::LazyLock;

use almanac_syntax::{parse_table, Category, Rule};

static CHINA: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parse_table(include_str!("../data/holidays_cn.txt"), Category::China)
        .expect("invalid embedded table of chinese holidays")
});

static UNITED_STATES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    parse_table(include_str!("../data/holidays_us.txt"), Category::UnitedStates)
        .expect("invalid embedded table of US holidays")
});

/// Built-in rules of a category, empty for custom rules.
///
/// ```
/// use almanac::builtin;
/// use almanac_syntax::Category;
///
/// let us = builtin::rules(Category::UnitedStates);
/// assert!(us.iter().any(|rule| rule.name == "Thanksgiving"));
/// assert!(builtin::rules(Category::Custom).is_empty());
/// ```
pub fn rules(category: Category) -> &'static [Rule] {
    match category {
        Category::China => &CHINA,
        Category::UnitedStates => &UNITED_STATES,
        Category::Custom => &[],
    }
}

/// All built-in rules, in display order.
pub fn all() -> impl Iterator<Item = &'static Rule> {
    [Category::China, Category::UnitedStates]
        .into_iter()
        .flat_map(rules)
}

/// Find a built-in rule by name.
pub fn find(name: &str) -> Option<&'static Rule> {
    all().find(|rule| rule.name == name)
}
