use crate::error::{AssetListError, Result};
use std::fmt;

/// One line of a grouped sound listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingLine {
    Open(String),
    Member(String),
    Close,
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingLine::Open(name) => write!(f, "{}={{", name),
            ListingLine::Member(token) => write!(f, "{}", token),
            ListingLine::Close => write!(f, "}}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub members: Vec<String>,
}

impl Group {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// Read a rendered listing back into its groups, checking that braces pair up.
pub fn parse_listing(text: &str) -> Result<Vec<Group>> {
    let mut groups = Vec::new();
    let mut current: Option<Group> = None;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_suffix("={") {
            if let Some(open) = &current {
                return Err(malformed(
                    line_number,
                    format!("group '{}' opened before '{}' was closed", name, open.name),
                ));
            }
            current = Some(Group::new(name));
        } else if line == "}" {
            match current.take() {
                Some(group) => groups.push(group),
                None => return Err(malformed(line_number, "unmatched '}'".to_string())),
            }
        } else {
            match current.as_mut() {
                Some(group) => group.members.push(line.to_string()),
                None => {
                    return Err(malformed(
                        line_number,
                        format!("member '{}' outside of any group", line),
                    ))
                }
            }
        }
    }

    if let Some(open) = current {
        return Err(malformed(
            text.lines().count(),
            format!("group '{}' is never closed", open.name),
        ));
    }

    Ok(groups)
}

fn malformed(line: usize, message: String) -> AssetListError {
    AssetListError::MalformedListing { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ListingLine::Open("Menu".to_string()).to_string(), "Menu={");
        assert_eq!(ListingLine::Member("Start".to_string()).to_string(), "Start");
        assert_eq!(ListingLine::Close.to_string(), "}");
    }

    #[test]
    fn test_parse_groups_in_order() {
        let groups = parse_listing("Menu={\nStart\nQuit\n}\nGame={\n}\n").unwrap();
        assert_eq!(
            groups,
            vec![
                Group {
                    name: "Menu".to_string(),
                    members: vec!["Start".to_string(), "Quit".to_string()],
                },
                Group::new("Game"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_listing("").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_nested_open() {
        let err = parse_listing("A={\nB={\n}\n}\n").unwrap_err();
        assert!(matches!(err, AssetListError::MalformedListing { line: 2, .. }));
    }

    #[test]
    fn test_rejects_unmatched_close() {
        let err = parse_listing("}\n").unwrap_err();
        assert!(matches!(err, AssetListError::MalformedListing { line: 1, .. }));
    }

    #[test]
    fn test_rejects_orphan_member() {
        let err = parse_listing("Start\n").unwrap_err();
        assert!(matches!(err, AssetListError::MalformedListing { line: 1, .. }));
    }

    #[test]
    fn test_rejects_unterminated_group() {
        let err = parse_listing("A={\nx\n").unwrap_err();
        assert!(matches!(err, AssetListError::MalformedListing { line: 2, .. }));
    }
}
