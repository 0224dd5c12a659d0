use std::str::FromStr;

use rolecast_core::AppError;

/// How a set of requested role names is matched against held roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleMatchMode {
    /// At least one requested role is held.
    Any,
    /// Every requested role is held.
    All,
}

impl RoleMatchMode {
    /// Returns a stable transport value for this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }

    /// Evaluates held role names against the requested names.
    ///
    /// Names compare exactly. `All` compares the number of requested names
    /// with the number of held roles whose name was requested, so repeating a
    /// requested name requires a matching number of held roles with that name.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, held_role_names: &[S], requested: &[String]) -> bool {
        let is_requested =
            |name: &S| requested.iter().any(|wanted| wanted.as_str() == name.as_ref());

        match self {
            Self::Any => held_role_names.iter().any(is_requested),
            Self::All => {
                requested.len() == held_role_names.iter().filter(|name| is_requested(name)).count()
            }
        }
    }
}

impl FromStr for RoleMatchMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(AppError::Validation(format!(
                "unknown role match mode '{value}'"
            ))),
        }
    }
}
