//! Staff directory used to resolve assignees.

use serde::{Deserialize, Serialize};

/// A person tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
}

impl StaffMember {
    pub fn new(id: &str, name: &str, department: &str) -> Self {
        StaffMember {
            id: id.to_string(),
            name: name.to_string(),
            department: Some(department.to_string()),
        }
    }
}

/// Look up the display name for a staff id, falling back to the id itself.
pub fn resolve_name(staff: &[StaffMember], id: &str) -> String {
    staff
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Avatar text for a person: the first letter of up to two name parts.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("ada"), "A");
        assert_eq!(initials("Mary Ann Lee"), "MA");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn test_resolve_name_falls_back_to_id() {
        let staff = vec![StaffMember::new("EMP001", "Sarah Johnson", "Engineering")];
        assert_eq!(resolve_name(&staff, "EMP001"), "Sarah Johnson");
        assert_eq!(resolve_name(&staff, "EMP999"), "EMP999");
    }
}
