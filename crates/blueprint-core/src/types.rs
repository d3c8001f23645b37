use crate::error::{BlueprintError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Wire marker for "let the generator pick" inside a tech multi-select.
pub const AI_DECIDE: &str = "__ai_decide__";

// ---------------------------------------------------------------------------
// AppType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppType {
    #[default]
    Web,
    Desktop,
    Mobile,
    Cli,
    Api,
    BrowserExtension,
}

impl AppType {
    pub fn all() -> &'static [AppType] {
        &[
            AppType::Web,
            AppType::Desktop,
            AppType::Mobile,
            AppType::Cli,
            AppType::Api,
            AppType::BrowserExtension,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppType::Web => "web",
            AppType::Desktop => "desktop",
            AppType::Mobile => "mobile",
            AppType::Cli => "cli",
            AppType::Api => "api",
            AppType::BrowserExtension => "browser-extension",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppType {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self> {
        AppType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BlueprintError::InvalidValue {
                field: "app type",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[default]
    MustHave,
    NiceToHave,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::MustHave => "must-have",
            Priority::NiceToHave => "nice-to-have",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "must-have" => Ok(Priority::MustHave),
            "nice-to-have" => Ok(Priority::NiceToHave),
            other => Err(BlueprintError::InvalidValue {
                field: "priority",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// UiStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiStyle {
    #[default]
    Minimal,
    Rich,
    Dashboard,
}

impl UiStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            UiStyle::Minimal => "minimal",
            UiStyle::Rich => "rich",
            UiStyle::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for UiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiStyle {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minimal" => Ok(UiStyle::Minimal),
            "rich" => Ok(UiStyle::Rich),
            "dashboard" => Ok(UiStyle::Dashboard),
            other => Err(BlueprintError::InvalidValue {
                field: "ui style",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// DocType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Prd,
    Tdd,
}

impl DocType {
    /// Generation order: PRD always runs before TDD.
    pub fn all() -> &'static [DocType] {
        &[DocType::Prd, DocType::Tdd]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Prd => "prd",
            DocType::Tdd => "tdd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocType::Prd => "PRD",
            DocType::Tdd => "TDD",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "prd" => Ok(DocType::Prd),
            "tdd" => Ok(DocType::Tdd),
            _ => Err(BlueprintError::InvalidDocType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TechChoice
// ---------------------------------------------------------------------------

/// One tech multi-select.
///
/// On the wire this is a plain string array. The AI-decide marker is
/// exclusive: an array containing it decodes to `AiDecide` and any
/// co-selected values are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum TechChoice {
    #[default]
    Unspecified,
    AiDecide,
    /// Non-empty, duplicate-free, in selection order.
    Explicit(Vec<String>),
}

impl TechChoice {
    /// Build an explicit selection, normalising empties and duplicates.
    pub fn explicit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TechChoice::from(values.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    pub fn is_unspecified(&self) -> bool {
        match self {
            TechChoice::Unspecified => true,
            TechChoice::AiDecide => false,
            TechChoice::Explicit(v) => v.is_empty(),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            TechChoice::Explicit(v) => v,
            _ => &[],
        }
    }
}

impl From<Vec<String>> for TechChoice {
    fn from(values: Vec<String>) -> Self {
        if values.iter().any(|v| v == AI_DECIDE) {
            return TechChoice::AiDecide;
        }
        let mut seen = Vec::with_capacity(values.len());
        for v in values {
            let v = v.trim().to_string();
            if !v.is_empty() && !seen.contains(&v) {
                seen.push(v);
            }
        }
        if seen.is_empty() {
            TechChoice::Unspecified
        } else {
            TechChoice::Explicit(seen)
        }
    }
}

impl From<TechChoice> for Vec<String> {
    fn from(choice: TechChoice) -> Self {
        match choice {
            TechChoice::Unspecified => Vec::new(),
            TechChoice::AiDecide => vec![AI_DECIDE.to_string()],
            TechChoice::Explicit(v) => v,
        }
    }
}

// ---------------------------------------------------------------------------
// WizardData
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectBasics {
    pub name: String,
    pub description: String,
    pub app_type: AppType,
    pub target_audience: String,
    pub core_problem: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

impl Feature {
    pub fn new(name: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPersona {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl UserPersona {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFlow {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub steps: String,
}

impl UserFlow {
    pub fn new(title: impl Into<String>, steps: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            steps: steps.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFeatures {
    pub features: Vec<Feature>,
    pub personas: Vec<UserPersona>,
    pub user_flows: Vec<UserFlow>,
}

impl ProjectFeatures {
    pub fn with_priority(&self, priority: Priority) -> impl Iterator<Item = &Feature> + '_ {
        self.features.iter().filter(move |f| f.priority == priority)
    }
}

/// The eleven tech multi-selects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectTech {
    pub language: TechChoice,
    pub framework: TechChoice,
    pub uiux: TechChoice,
    pub database: TechChoice,
    pub storage: TechChoice,
    pub cicd: TechChoice,
    pub payment: TechChoice,
    pub integrations: TechChoice,
    pub performance_requirements: TechChoice,
    pub auth_needs: TechChoice,
    pub auth_method: TechChoice,
}

/// Field keys accepted by [`ProjectTech::field_mut`], in display order.
pub const TECH_FIELDS: [&str; 11] = [
    "language",
    "framework",
    "uiux",
    "database",
    "storage",
    "cicd",
    "payment",
    "integrations",
    "performance-requirements",
    "auth-needs",
    "auth-method",
];

impl ProjectTech {
    /// `(label, choice)` pairs in display order.
    pub fn labelled(&self) -> [(&'static str, &TechChoice); 11] {
        [
            ("Language", &self.language),
            ("Framework", &self.framework),
            ("UI/UX", &self.uiux),
            ("Database", &self.database),
            ("Storage", &self.storage),
            ("CI/CD", &self.cicd),
            ("Payment", &self.payment),
            ("Integrations", &self.integrations),
            ("Performance Requirements", &self.performance_requirements),
            ("Authentication Needs", &self.auth_needs),
            ("Authentication Method", &self.auth_method),
        ]
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut TechChoice> {
        let field = match key {
            "language" => &mut self.language,
            "framework" => &mut self.framework,
            "uiux" => &mut self.uiux,
            "database" => &mut self.database,
            "storage" => &mut self.storage,
            "cicd" => &mut self.cicd,
            "payment" => &mut self.payment,
            "integrations" => &mut self.integrations,
            "performance-requirements" => &mut self.performance_requirements,
            "auth-needs" => &mut self.auth_needs,
            "auth-method" => &mut self.auth_method,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDesign {
    pub ui_style: UiStyle,
    pub responsive_requirements: String,
    pub accessibility_needs: String,
    pub reference_apps: String,
}

/// The full answer-set collected by the wizard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardData {
    pub basics: ProjectBasics,
    pub features: ProjectFeatures,
    pub tech: ProjectTech,
    pub design: ProjectDesign,
}
