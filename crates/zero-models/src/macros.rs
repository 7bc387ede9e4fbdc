//! Prompt construction macros

/// Build a [`Prompt`](crate::Prompt) or a [`PromptList`](crate::PromptList)
///
/// - `prompt!("text")` builds a prompt from one piece of text
/// - `prompt!(["a", "b"])` concatenates the pieces into one prompt
/// - `prompt!(system: "...", user: "...", assistant: "...")` builds a
///   role-tagged list, in the given order
///
/// ```
/// use zero_models::{Role, prompt};
///
/// let list = prompt!(system: "You are terse.", user: "Hi");
/// assert_eq!(list.iter().next().map(|m| m.role), Some(Role::System));
///
/// let joined = prompt!(["Hello, ", "{{name}}"]);
/// assert_eq!(joined.as_str(), "Hello, {{name}}");
/// ```
#[macro_export]
macro_rules! prompt {
    (@role system) => {
        $crate::Role::System
    };
    (@role user) => {
        $crate::Role::User
    };
    (@role assistant) => {
        $crate::Role::Assistant
    };
    ($($role:ident : $content:expr),+ $(,)?) => {{
        let mut list = $crate::PromptList::new();
        $( list.add_message($crate::prompt!(@role $role), $content); )+
        list
    }};
    ([$($part:expr),+ $(,)?]) => {
        $crate::Prompt::new([$(::std::convert::AsRef::<str>::as_ref(&$part)),+].concat())
    };
    ($text:expr) => {
        $crate::Prompt::new($text)
    };
}

/// Build the variable map taken by [`Template::format`](crate::Template::format)
///
/// ```
/// use zero_models::vars;
///
/// let vars = vars! { "name" => "Ada", "lang" => "rust" };
/// assert_eq!(vars.get("lang"), Some(&"rust"));
/// ```
#[macro_export]
macro_rules! vars {
    () => {
        ::std::collections::HashMap::<&str, &str>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = ::std::collections::HashMap::<&str, &str>::new();
        $( map.insert($key, $value); )+
        map
    }};
}
