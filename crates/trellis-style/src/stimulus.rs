//! Stimulus `data-*` attribute builders.
//!
//! Each builder returns an [`Attributes`] fragment of `data` sub-keys. Wrap
//! fragments with [`Attributes::with_data`] and combine them with
//! [`merge_attributes`](crate::merge_attributes); `controller` and `action`
//! accumulate.
//!
//! | Builder | Sub-key | Value |
//! |---------|---------|-------|
//! | [`stimulus_controller`] | `controller` | identifiers, space-joined |
//! | [`stimulus_action`] | `action` | `event->controller#method` |
//! | [`stimulus_target`] | `{controller}-target` | target name |
//! | [`stimulus_value`] | `{controller}-{name}-value` | value |
//! | [`stimulus_class`] | `{controller}-{name}-class` | classes |
//! | [`stimulus_outlet`] | `{controller}-{name}-outlet` | selector |
//!
//! Controller names go through [`stimulus_identifier`], so
//! `"Admin::UserForm"` becomes `admin--user-form`.

use deunicode::deunicode;
use trellis_options::Value;

use crate::attributes::Attributes;
use crate::error::AttributeError;

type Result<T> = std::result::Result<T, AttributeError>;

/// Converts a controller name into a Stimulus identifier.
///
/// Non-ASCII text is transliterated, `::` and `/` become `--`, underscores
/// and spaces become `-`, and camel case is split.
///
/// ```rust
/// use trellis_style::stimulus_identifier;
///
/// assert_eq!(stimulus_identifier("Admin::UserForm").unwrap(), "admin--user-form");
/// assert_eq!(stimulus_identifier("users/list_item").unwrap(), "users--list-item");
/// assert!(stimulus_identifier("  ").is_err());
/// ```
pub fn stimulus_identifier(name: &str) -> Result<String> {
    let name = non_blank(name, "controller name")?;
    let ascii = deunicode(name).replace("::", "/");

    let mut out = String::with_capacity(ascii.len() + 4);
    let mut prev: Option<char> = None;
    for c in ascii.chars() {
        match c {
            '/' => out.push_str("--"),
            '_' | ' ' | '-' => {
                if !out.is_empty() && !out.ends_with('-') {
                    out.push('-');
                }
            }
            c if c.is_ascii_alphanumeric() => {
                if c.is_ascii_uppercase()
                    && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
                {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
            }
            _ => {}
        }
        prev = Some(c);
    }

    let identifier = out.trim_matches('-').to_string();
    if identifier.is_empty() {
        return Err(AttributeError::BlankIdentifier {
            what: "controller name",
        });
    }
    Ok(identifier)
}

/// `data-controller` for one or more controllers.
pub fn stimulus_controller<I, S>(names: I) -> Result<Attributes>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let identifiers = names
        .into_iter()
        .map(|name| stimulus_identifier(name.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    if identifiers.is_empty() {
        return Err(AttributeError::BlankIdentifier {
            what: "controller name",
        });
    }
    Ok(Attributes::new().with("controller", identifiers.join(" ")))
}

/// `data-action` descriptor. Without an event, Stimulus uses the element's
/// default event.
pub fn stimulus_action(controller: &str, method: &str, event: Option<&str>) -> Result<Attributes> {
    let controller = stimulus_identifier(controller)?;
    let method = non_blank(method, "action method")?;
    let descriptor = match event.map(str::trim).filter(|e| !e.is_empty()) {
        Some(event) => format!("{}->{}#{}", event, controller, method),
        None => format!("{}#{}", controller, method),
    };
    Ok(Attributes::new().with("action", descriptor))
}

/// `data-{controller}-target`.
pub fn stimulus_target(controller: &str, target: &str) -> Result<Attributes> {
    let controller = stimulus_identifier(controller)?;
    let target = non_blank(target, "target name")?;
    Ok(Attributes::new().with(format!("{}-target", controller), target))
}

/// `data-{controller}-{name}-value`.
pub fn stimulus_value(controller: &str, name: &str, value: impl Into<Value>) -> Result<Attributes> {
    let key = scoped_key(controller, name, "value")?;
    Ok(Attributes::new().with(key, value))
}

/// `data-{controller}-{name}-class`.
pub fn stimulus_class(controller: &str, name: &str, classes: &str) -> Result<Attributes> {
    let key = scoped_key(controller, name, "class")?;
    Ok(Attributes::new().with(key, classes.trim()))
}

/// `data-{controller}-{name}-outlet`.
pub fn stimulus_outlet(controller: &str, name: &str, selector: &str) -> Result<Attributes> {
    let key = scoped_key(controller, name, "outlet")?;
    let selector = non_blank(selector, "outlet selector")?;
    Ok(Attributes::new().with(key, selector))
}

fn scoped_key(controller: &str, name: &str, kind: &str) -> Result<String> {
    let controller = stimulus_identifier(controller)?;
    let name = non_blank(name, "attribute name")?;
    let name = stimulus_identifier(name).map_err(|_| AttributeError::BlankIdentifier {
        what: "attribute name",
    })?;
    Ok(format!("{}-{}-{}", controller, name, kind))
}

fn non_blank<'a>(text: &'a str, what: &'static str) -> Result<&'a str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(AttributeError::BlankIdentifier { what })
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rules() {
        assert_eq!(stimulus_identifier("modal").unwrap(), "modal");
        assert_eq!(stimulus_identifier("DropdownMenu").unwrap(), "dropdown-menu");
        assert_eq!(stimulus_identifier("date_picker").unwrap(), "date-picker");
        assert_eq!(stimulus_identifier("ui/date picker").unwrap(), "ui--date-picker");
        assert_eq!(stimulus_identifier("Crème Brûlée").unwrap(), "creme-brulee");
        assert_eq!(stimulus_identifier("Chart3D").unwrap(), "chart3-d");
    }

    #[test]
    fn test_identifier_blank() {
        assert_eq!(
            stimulus_identifier(""),
            Err(AttributeError::BlankIdentifier {
                what: "controller name"
            })
        );
        assert!(stimulus_identifier("!!").is_err());
    }

    #[test]
    fn test_controller() {
        let attrs = stimulus_controller(["Modal", "tooltip"]).unwrap();
        assert_eq!(attrs.get("controller"), Some(&Value::from("modal tooltip")));
        assert!(stimulus_controller(Vec::<&str>::new()).is_err());
        assert!(stimulus_controller(["modal", " "]).is_err());
    }

    #[test]
    fn test_action() {
        let attrs = stimulus_action("modal", "open", Some("click")).unwrap();
        assert_eq!(attrs.get("action"), Some(&Value::from("click->modal#open")));

        let attrs = stimulus_action("modal", "open", None).unwrap();
        assert_eq!(attrs.get("action"), Some(&Value::from("modal#open")));

        assert_eq!(
            stimulus_action("modal", " ", None),
            Err(AttributeError::BlankIdentifier {
                what: "action method"
            })
        );
    }

    #[test]
    fn test_scoped_keys() {
        let attrs = stimulus_target("SearchForm", "input").unwrap();
        assert_eq!(attrs.get("search-form-target"), Some(&Value::from("input")));

        let attrs = stimulus_value("modal", "open", true).unwrap();
        assert_eq!(attrs.get("modal-open-value"), Some(&Value::Bool(true)));

        let attrs = stimulus_value("modal", "maxWidth", 640).unwrap();
        assert_eq!(attrs.get("modal-max-width-value"), Some(&Value::Int(640)));

        let attrs = stimulus_class("toggle", "active", " bg-blue-500 ").unwrap();
        assert_eq!(attrs.get("toggle-active-class"), Some(&Value::from("bg-blue-500")));

        let attrs = stimulus_outlet("chat", "message-list", "#messages").unwrap();
        assert_eq!(attrs.get("chat-message-list-outlet"), Some(&Value::from("#messages")));

        assert!(stimulus_outlet("chat", "list", "").is_err());
        assert!(stimulus_value("modal", "", 1).is_err());
    }
}
