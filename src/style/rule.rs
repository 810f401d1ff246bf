//! The rule forest produced by lowering.
//!
//! Rules keep the branch structure of the description: wrapper rules carry
//! the runtime condition or theme prelude of a branch, and class rules at the
//! leaves carry the token and declarations. The CSS emitter only reads the
//! leaves; the selection procedure reads the whole shape.

use crate::theme::{ConditionId, Declaration};

/// A rule's selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// An atomic class rule.
    Class(ClassSelector),
    /// Children are nested under a theme condition's prelude.
    Prelude(ConditionId),
    /// A plain grouping of child rules.
    Group,
}

/// An atomic class and the theme conditions it is nested under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelector {
    /// The class token.
    pub token: String,
    /// Active theme conditions, ascending and unique.
    pub conditions: Vec<ConditionId>,
}

/// A condition decided by the selection procedure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeCondition {
    Flag(String),
    Variant { name: String, tag: String },
}

impl RuntimeCondition {
    /// The render-state name this condition reads.
    pub fn name(&self) -> &str {
        match self {
            RuntimeCondition::Flag(name) => name,
            RuntimeCondition::Variant { name, .. } => name,
        }
    }
}

/// A rule's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleBody {
    Declarations(Vec<Declaration>),
    Rules(Vec<Rule>),
}

/// One node of the rule forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: Selector,
    /// Cascade layer: the highest active theme condition, or the base layer.
    pub layer: Option<ConditionId>,
    /// Set on decision branches; unset on unconditional ones.
    pub condition: Option<RuntimeCondition>,
    pub body: RuleBody,
}

impl Rule {
    /// Visits every class rule below and including this one, in order.
    pub fn for_each_class<'r>(&'r self, f: &mut impl FnMut(&'r ClassSelector, &'r [Declaration])) {
        match (&self.selector, &self.body) {
            (Selector::Class(class), RuleBody::Declarations(declarations)) => {
                f(class, declarations)
            }
            (_, RuleBody::Rules(children)) => {
                for child in children {
                    child.for_each_class(f);
                }
            }
            _ => {}
        }
    }
}

/// The rules for one longhand, or one custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRules {
    /// The property unit every token in this group starts with.
    pub unit: String,
    /// The longhand or custom property name.
    pub name: String,
    pub rules: Vec<Rule>,
}

/// All rules of one style description, one group per longhand in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleForest {
    pub groups: Vec<PropertyRules>,
}

impl RuleForest {
    /// Every class rule in declaration order.
    pub fn classes(&self) -> Vec<(&ClassSelector, &[Declaration])> {
        let mut out = Vec::new();
        for group in &self.groups {
            for rule in &group.rules {
                rule.for_each_class(&mut |class, declarations| out.push((class, declarations)));
            }
        }
        out
    }

    /// Every class token in declaration order.
    pub fn tokens(&self) -> Vec<&str> {
        self.classes()
            .into_iter()
            .map(|(class, _)| class.token.as_str())
            .collect()
    }
}
