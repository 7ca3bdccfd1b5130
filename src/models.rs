use serde::{Deserialize, Serialize};

/// Whether the developer is taking on work
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Busy,
    Unavailable,
}

impl Availability {
    pub fn status_line(&self) -> &str {
        match self {
            Availability::Available => "● Open to new engagements",
            Availability::Busy => "◐ Limited availability",
            Availability::Unavailable => "○ Not currently available",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub label: String,
}

/// The person the paper is about
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub bio: String,
    pub location: String,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Live,
    Archived,
    Wip,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Live => "Live",
            ProjectStatus::Archived => "Archived",
            ProjectStatus::Wip => "In Progress",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Api,
    Tool,
    Other,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectCategory::Web => "Web",
            ProjectCategory::Mobile => "Mobile",
            ProjectCategory::Api => "API",
            ProjectCategory::Tool => "Tool",
            ProjectCategory::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub headline: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub role: String,
    pub year: i32,
    pub status: ProjectStatus,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub category: ProjectCategory,
    #[serde(default)]
    pub impact: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Expert,
    Proficient,
    Familiar,
}

impl SkillLevel {
    pub fn label(&self) -> &str {
        match self {
            SkillLevel::Expert => "Expert",
            SkillLevel::Proficient => "Proficient",
            SkillLevel::Familiar => "Familiar",
        }
    }

    /// Fill of the skill bar, in percent
    pub fn width_percent(&self) -> u16 {
        match self {
            SkillLevel::Expert => 90,
            SkillLevel::Proficient => 62,
            SkillLevel::Familiar => 36,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillItem {
    pub name: String,
    pub level: SkillLevel,
    #[serde(default)]
    pub years_exp: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Skill {
    pub category: String,
    pub items: Vec<SkillItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    pub period: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    pub location: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// ISO date, e.g. `2024-03-02`
    pub published_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub reading_time: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub url: Option<String>,
}

/// Everything the paper prints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortfolioData {
    pub developer: Developer,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl PortfolioData {
    pub fn featured_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }

    /// Projects with featured ones first, newest first within each group
    pub fn projects_by_prominence(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.iter().collect();
        projects.sort_by(|a, b| b.featured.cmp(&a.featured).then(b.year.cmp(&a.year)));
        projects
    }

    pub fn featured_article(&self) -> Option<&Article> {
        self.articles
            .iter()
            .find(|a| a.featured)
            .or_else(|| self.articles.first())
    }
}
