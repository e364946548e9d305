//! Resource permissions as resolved for the current user

use serde::{Deserialize, Serialize};

/// Operations the current user may perform on an entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationPermission {
    #[serde(default)]
    pub view_all: bool,

    #[serde(default)]
    pub view_basic: bool,

    #[serde(default)]
    pub view_sample_data: bool,

    #[serde(default)]
    pub view_data_profile: bool,

    #[serde(default)]
    pub view_tests: bool,

    #[serde(default)]
    pub edit_all: bool,

    #[serde(default)]
    pub edit_sample_data: bool,

    #[serde(default)]
    pub edit_data_profile: bool,

    #[serde(default)]
    pub edit_tests: bool,

    #[serde(default)]
    pub edit_custom_fields: bool,

    #[serde(default)]
    pub delete: bool,
}

impl OperationPermission {
    /// Everything allowed, used when permissions are not enforced
    pub fn all() -> Self {
        Self {
            view_all: true,
            view_basic: true,
            view_sample_data: true,
            view_data_profile: true,
            view_tests: true,
            edit_all: true,
            edit_sample_data: true,
            edit_data_profile: true,
            edit_tests: true,
            edit_custom_fields: true,
            delete: true,
        }
    }

    pub fn can_view_sample_data(&self) -> bool {
        self.view_all || self.view_basic || self.view_sample_data
    }

    pub fn can_view_profile(&self) -> bool {
        self.view_all || self.view_data_profile
    }

    pub fn can_edit_profile(&self) -> bool {
        self.edit_all || self.edit_data_profile
    }

    pub fn can_edit_tests(&self) -> bool {
        self.edit_all || self.edit_tests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pascal_case() {
        let permissions: OperationPermission =
            serde_json::from_str(r#"{"ViewAll": false, "EditSampleData": true, "EditDataProfile": true}"#).unwrap();
        assert!(permissions.edit_sample_data);
        assert!(permissions.can_edit_profile());
        assert!(!permissions.can_view_profile());
        assert!(!permissions.can_edit_tests());
    }

    #[test]
    fn test_all() {
        let permissions = OperationPermission::all();
        assert!(permissions.can_view_sample_data());
        assert!(permissions.can_edit_tests());
    }
}
