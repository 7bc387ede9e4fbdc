//! Prompt templates
//!
//! A template marks its variables as `{{name}}`. Variables are filled in
//! with [`Template::resolve_var`] or [`Template::format`], and
//! [`Template::finalize`] refuses a template that still has placeholders.
//!
//! ```
//! use zero_models::{Template, prompt, vars};
//!
//! let prompt = prompt!("Write a poem about {{topic}}.")
//!     .resolve(&vars! { "topic" => "the sea" })?;
//! assert_eq!(prompt.as_str(), "Write a poem about the sea.");
//! # Ok::<(), zero_models::LMError>(())
//! ```

use crate::{LMError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("variable pattern is valid")
});

fn placeholder(var: &str) -> String {
    format!("{{{{{var}}}}}")
}

fn collect_vars(text: &str, vars: &mut Vec<String>) {
    for cap in VAR_PATTERN.captures_iter(text) {
        let name = &cap[1];
        if !vars.iter().any(|var| var == name) {
            vars.push(name.to_string());
        }
    }
}

// Single pass, so substituted values are never expanded again.
fn fill(text: &str, vars: &HashMap<&str, &str>) -> String {
    VAR_PATTERN
        .replace_all(text, |cap: &Captures<'_>| match vars.get(&cap[1]) {
            Some(value) => (*value).to_string(),
            None => cap[0].to_string(),
        })
        .into_owned()
}

/// Operations shared by every prompt template
pub trait Template: Sized {
    /// Names of the placeholders still present, in order of first appearance
    fn unresolved_vars(&self) -> Vec<String>;

    /// Replace every `{{var}}` placeholder with `value`
    fn resolve_var(&mut self, var: &str, value: &str);

    /// Fill in every placeholder that has an entry in `vars`
    ///
    /// Placeholders without an entry are left untouched.
    fn format(&mut self, vars: &HashMap<&str, &str>);

    /// Whether any placeholder is left
    fn has_unresolved_vars(&self) -> bool {
        !self.unresolved_vars().is_empty()
    }

    /// Check that the template is ready to be sent
    fn finalize(self) -> Result<Self> {
        let vars = self.unresolved_vars();
        if vars.is_empty() {
            Ok(self)
        } else {
            Err(LMError::UnresolvedVars(vars))
        }
    }

    /// Fill in `vars`, then finalize
    fn resolve(mut self, vars: &HashMap<&str, &str>) -> Result<Self> {
        self.format(vars);
        self.finalize()
    }
}

/// A value that can be sent to a [`LanguageModel`](crate::LanguageModel)
///
/// Plain strings are sent verbatim. Templates must be fully resolved first.
pub trait Payload: Send + 'static {
    /// Fail with [`LMError::UnresolvedVars`] if the payload is not ready to
    /// be sent
    fn ensure_resolved(&self) -> Result<()>;
}

impl Payload for String {
    fn ensure_resolved(&self) -> Result<()> {
        Ok(())
    }
}

/// A single text prompt template
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Create a prompt from its template text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The current text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the prompt and return its text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Template for Prompt {
    fn unresolved_vars(&self) -> Vec<String> {
        let mut vars = Vec::new();
        collect_vars(&self.0, &mut vars);
        vars
    }

    fn resolve_var(&mut self, var: &str, value: &str) {
        self.0 = self.0.replace(&placeholder(var), value);
    }

    fn format(&mut self, vars: &HashMap<&str, &str>) {
        self.0 = fill(&self.0, vars);
    }
}

impl Payload for Prompt {
    fn ensure_resolved(&self) -> Result<()> {
        ensure_resolved(self)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<Prompt> for String {
    fn from(prompt: Prompt) -> Self {
        prompt.0
    }
}

/// Who a message in a [`PromptList`] comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model
    System,
    /// The person prompting the model
    User,
    /// The model itself
    Assistant,
}

impl Role {
    /// Lowercase role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged message template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Author of the message
    pub role: Role,
    /// Template text
    pub content: String,
}

/// An ordered conversation of role-tagged message templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptList {
    messages: Vec<PromptMessage>,
}

impl PromptList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(PromptMessage {
            role,
            content: content.into(),
        });
    }

    /// Append a message (builder style)
    pub fn with_message(mut self, role: Role, content: impl Into<String>) -> Self {
        self.add_message(role, content);
        self
    }

    /// Iterate over the messages in order
    pub fn iter(&self) -> std::slice::Iter<'_, PromptMessage> {
        self.messages.iter()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the list has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Template for PromptList {
    fn unresolved_vars(&self) -> Vec<String> {
        let mut vars = Vec::new();
        for message in &self.messages {
            collect_vars(&message.content, &mut vars);
        }
        vars
    }

    fn resolve_var(&mut self, var: &str, value: &str) {
        let placeholder = placeholder(var);
        for message in &mut self.messages {
            message.content = message.content.replace(&placeholder, value);
        }
    }

    fn format(&mut self, vars: &HashMap<&str, &str>) {
        for message in &mut self.messages {
            message.content = fill(&message.content, vars);
        }
    }
}

impl Payload for PromptList {
    fn ensure_resolved(&self) -> Result<()> {
        ensure_resolved(self)
    }
}

impl FromIterator<PromptMessage> for PromptList {
    fn from_iter<I: IntoIterator<Item = PromptMessage>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PromptList {
    type Item = PromptMessage;
    type IntoIter = std::vec::IntoIter<PromptMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a PromptList {
    type Item = &'a PromptMessage;
    type IntoIter = std::slice::Iter<'a, PromptMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

fn ensure_resolved<T: Template>(template: &T) -> Result<()> {
    let vars = template.unresolved_vars();
    if vars.is_empty() {
        Ok(())
    } else {
        Err(LMError::UnresolvedVars(vars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_vars_in_order() {
        let prompt = Prompt::new("{{greeting}}, {{name}}! {{greeting}} again.");
        assert_eq!(prompt.unresolved_vars(), vec!["greeting", "name"]);
        assert!(prompt.has_unresolved_vars());

        // Not valid placeholders
        let prompt = Prompt::new("{{ name }} {{1st}} {name} {{}}");
        assert!(prompt.unresolved_vars().is_empty());
    }

    #[test]
    fn test_resolve_var() {
        let mut prompt = Prompt::new("Hi {{name}}, bye {{name}}");
        prompt.resolve_var("name", "Ada");
        assert_eq!(prompt.as_str(), "Hi Ada, bye Ada");
        assert!(!prompt.has_unresolved_vars());
    }

    #[test]
    fn test_format_leaves_missing_vars() {
        let mut prompt = Prompt::new("{{a}} and {{b}}");
        let vars = HashMap::from([("a", "one")]);
        prompt.format(&vars);
        assert_eq!(prompt.as_str(), "one and {{b}}");
        assert_eq!(prompt.unresolved_vars(), vec!["b"]);
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        let mut prompt = Prompt::new("{{a}} {{b}}");
        let vars = HashMap::from([("a", "{{b}}"), ("b", "two")]);
        prompt.format(&vars);
        assert_eq!(prompt.as_str(), "{{b}} two");
    }

    #[test]
    fn test_finalize_reports_missing_vars() {
        let err = Prompt::new("Summarize {{doc}} for {{audience}}")
            .finalize()
            .unwrap_err();
        match err {
            LMError::UnresolvedVars(vars) => assert_eq!(vars, vec!["doc", "audience"]),
            other => panic!("expected unresolved vars, got {other:?}"),
        }

        let prompt = Prompt::new("no variables here").finalize().unwrap();
        assert_eq!(prompt.to_string(), "no variables here");
    }

    #[test]
    fn test_resolve() {
        let vars = HashMap::from([("doc", "the report"), ("audience", "managers")]);
        let prompt = Prompt::new("Summarize {{doc}} for {{audience}}")
            .resolve(&vars)
            .unwrap();
        assert_eq!(prompt.as_str(), "Summarize the report for managers");

        let result = Prompt::new("{{doc}} {{extra}}").resolve(&vars);
        assert!(matches!(result, Err(LMError::UnresolvedVars(v)) if v == vec!["extra"]));
    }

    #[test]
    fn test_prompt_list_messages() {
        let mut list = PromptList::new();
        list.add_message(Role::System, "You are {{persona}}.");
        list.add_message(Role::User, "Tell me about {{topic}}.");
        let list = list.with_message(Role::Assistant, "Sure.");

        assert_eq!(list.len(), 3);
        let roles: Vec<Role> = list.iter().map(|message| message.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(list.unresolved_vars(), vec!["persona", "topic"]);

        let vars = HashMap::from([("persona", "a tutor"), ("topic", "rust")]);
        let list = list.resolve(&vars).unwrap();
        let contents: Vec<&str> = list.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["You are a tutor.", "Tell me about rust.", "Sure."]);
    }

    #[test]
    fn test_prompt_list_serde() {
        let list = PromptList::new()
            .with_message(Role::System, "Be brief.")
            .with_message(Role::User, "Hi");
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(
            json,
            r#"[{"role":"system","content":"Be brief."},{"role":"user","content":"Hi"}]"#
        );

        let parsed: PromptList = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, list);
        assert!(serde_json::from_str::<PromptList>(r#"[{"role":"tool","content":""}]"#).is_err());
    }

    #[test]
    fn test_payload_readiness() {
        assert!("{{raw}}".to_string().ensure_resolved().is_ok());
        assert!(Prompt::new("{{x}}").ensure_resolved().is_err());
        assert!(Prompt::new("ready").ensure_resolved().is_ok());

        let list = PromptList::new().with_message(Role::User, "{{question}}");
        assert!(matches!(
            list.ensure_resolved(),
            Err(LMError::UnresolvedVars(_))
        ));
    }
}
