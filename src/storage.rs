use crate::models::{
    Article, Availability, Developer, Experience, PortfolioData, Project, ProjectCategory,
    ProjectStatus, Skill, SkillItem, SkillLevel, SocialLink,
};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Slices of portfolio data that can be invalidated independently
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Developer,
    Projects,
    Skills,
    Experience,
    Articles,
}

impl CacheTag {
    pub const ALL: [CacheTag; 5] = [
        CacheTag::Developer,
        CacheTag::Projects,
        CacheTag::Skills,
        CacheTag::Experience,
        CacheTag::Articles,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CacheTag::Developer => "developer",
            CacheTag::Projects => "projects",
            CacheTag::Skills => "skills",
            CacheTag::Experience => "experience",
            CacheTag::Articles => "articles",
        }
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheTag {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CacheTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or(())
    }
}

/// Read-only portfolio data, loaded once and cached
pub struct Storage {
    data: PortfolioData,
    data_path: PathBuf,
    stale: HashSet<CacheTag>,
}

impl Storage {
    /// Load from `data_path`, falling back to the built-in edition
    pub fn new(data_path: PathBuf) -> Self {
        let data = match load_portfolio(&data_path) {
            Ok(data) => {
                tracing::info!(path = %data_path.display(), "Loaded portfolio data");
                data
            }
            Err(e) => {
                tracing::info!(path = %data_path.display(), error = %e, "Using built-in portfolio data");
                sample_portfolio()
            }
        };

        Storage {
            data,
            data_path,
            stale: HashSet::new(),
        }
    }

    pub fn data(&self) -> &PortfolioData {
        &self.data
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Write the current edition to `data_path` when no file exists yet, so
    /// there is something on disk to edit. Returns whether a file was written.
    pub fn seed_data_file(&self) -> Result<bool> {
        if self.data_path.exists() {
            return Ok(false);
        }
        save_portfolio(&self.data_path, &self.data)?;
        tracing::info!(path = %self.data_path.display(), "Wrote portfolio data file");
        Ok(true)
    }

    pub fn is_stale(&self, tag: CacheTag) -> bool {
        self.stale.contains(&tag)
    }

    /// Invalidate the slice named by `tag` and reload it. Returns whether the
    /// tag is one of the known ones; unknown tags change nothing.
    pub fn revalidate(&mut self, tag: &str) -> bool {
        let Ok(tag) = tag.parse::<CacheTag>() else {
            tracing::warn!(tag, "Ignoring unknown revalidation tag");
            return false;
        };

        self.stale.insert(tag);
        self.refresh();
        true
    }

    /// Reload every stale slice from disk. On failure the cached data stays
    /// and the slices remain stale.
    pub fn refresh(&mut self) {
        if self.stale.is_empty() {
            return;
        }

        let fresh = match load_portfolio(&self.data_path) {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!(error = %e, "Portfolio reload failed, keeping cached data");
                return;
            }
        };

        for tag in self.stale.drain() {
            tracing::info!(%tag, "Revalidated portfolio data");
            match tag {
                CacheTag::Developer => self.data.developer = fresh.developer.clone(),
                CacheTag::Projects => self.data.projects = fresh.projects.clone(),
                CacheTag::Skills => self.data.skills = fresh.skills.clone(),
                CacheTag::Experience => self.data.experience = fresh.experience.clone(),
                CacheTag::Articles => self.data.articles = fresh.articles.clone(),
            }
        }
    }
}

/// Read a portfolio YAML file
pub fn load_portfolio(path: &Path) -> Result<PortfolioData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let data = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(data)
}

/// Write a portfolio YAML file, creating parent directories
pub fn save_portfolio(path: &Path, data: &PortfolioData) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_yaml::to_string(data)?;
    fs::write(path, content)?;
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The edition printed when no data file exists
pub fn sample_portfolio() -> PortfolioData {
    PortfolioData {
        developer: Developer {
            name: "Ada Whitfield".to_string(),
            title: "Full-Stack Engineer".to_string(),
            tagline: "Building durable software for the web, one edition at a time.".to_string(),
            bio: "Engineer with a decade of shipping product: typed APIs, fast frontends and \
                  the infrastructure underneath. Happiest where careful design meets a deadline."
                .to_string(),
            location: "Lisbon, Portugal".to_string(),
            availability: Availability::Available,
            social_links: vec![
                SocialLink {
                    platform: "github".to_string(),
                    url: "https://github.com/adawhitfield".to_string(),
                    label: "GitHub".to_string(),
                },
                SocialLink {
                    platform: "linkedin".to_string(),
                    url: "https://www.linkedin.com/in/adawhitfield".to_string(),
                    label: "LinkedIn".to_string(),
                },
            ],
            resume_url: None,
        },
        projects: vec![
            Project {
                id: "p1".to_string(),
                slug: "ledgerline".to_string(),
                title: "Ledgerline".to_string(),
                headline: "Real-time bookkeeping for small studios".to_string(),
                description: "Double-entry accounting with live bank feeds and a reconciliation inbox."
                    .to_string(),
                long_description: String::new(),
                tech: strings(&["TypeScript", "PostgreSQL", "Rust"]),
                role: "Lead Engineer".to_string(),
                year: 2024,
                status: ProjectStatus::Live,
                live_url: Some("https://ledgerline.example.com".to_string()),
                repo_url: None,
                featured: true,
                category: ProjectCategory::Web,
                impact: Some("Cut month-end close from days to hours".to_string()),
            },
            Project {
                id: "p2".to_string(),
                slug: "tidewatch".to_string(),
                title: "Tidewatch".to_string(),
                headline: "Offline-first tide tables for sailors".to_string(),
                description: "Mobile app computing harmonic tide predictions on device.".to_string(),
                long_description: String::new(),
                tech: strings(&["Kotlin", "Swift"]),
                role: "Solo Developer".to_string(),
                year: 2022,
                status: ProjectStatus::Archived,
                live_url: None,
                repo_url: Some("https://github.com/adawhitfield/tidewatch".to_string()),
                featured: false,
                category: ProjectCategory::Mobile,
                impact: None,
            },
        ],
        skills: vec![
            Skill {
                category: "Languages".to_string(),
                items: vec![
                    SkillItem { name: "TypeScript".to_string(), level: SkillLevel::Expert, years_exp: Some(8) },
                    SkillItem { name: "Rust".to_string(), level: SkillLevel::Proficient, years_exp: Some(4) },
                    SkillItem { name: "Go".to_string(), level: SkillLevel::Familiar, years_exp: None },
                ],
            },
            Skill {
                category: "Infrastructure".to_string(),
                items: vec![
                    SkillItem { name: "PostgreSQL".to_string(), level: SkillLevel::Expert, years_exp: Some(9) },
                    SkillItem { name: "Kubernetes".to_string(), level: SkillLevel::Proficient, years_exp: Some(3) },
                ],
            },
        ],
        experience: vec![
            Experience {
                id: "e1".to_string(),
                company: "Northwind Labs".to_string(),
                role: "Staff Engineer".to_string(),
                period: "2021 – Present".to_string(),
                start_date: "2021-02-01".to_string(),
                end_date: None,
                current: true,
                description: "Leads the platform group behind the payments product.".to_string(),
                achievements: strings(&[
                    "Migrated billing to an event-sourced ledger",
                    "Halved p99 checkout latency",
                ]),
                tech: strings(&["Rust", "Kafka", "PostgreSQL"]),
                location: "Remote".to_string(),
            },
            Experience {
                id: "e2".to_string(),
                company: "Harbor & Co".to_string(),
                role: "Senior Frontend Engineer".to_string(),
                period: "2017 – 2021".to_string(),
                start_date: "2017-05-01".to_string(),
                end_date: Some("2021-01-31".to_string()),
                current: false,
                description: "Built the design system and the merchant dashboard.".to_string(),
                achievements: strings(&["Shipped a component library used by 14 teams"]),
                tech: strings(&["TypeScript", "React"]),
                location: "Porto, Portugal".to_string(),
            },
        ],
        articles: vec![
            Article {
                id: "a1".to_string(),
                slug: "boring-ledgers".to_string(),
                title: "In Praise of Boring Ledgers".to_string(),
                excerpt: "Append-only tables, and why your accountant already knew.".to_string(),
                published_at: "2024-03-02".to_string(),
                tags: strings(&["databases", "design"]),
                reading_time: 7,
                featured: true,
                url: None,
            },
            Article {
                id: "a2".to_string(),
                slug: "offline-first".to_string(),
                title: "Offline First, Online Eventually".to_string(),
                excerpt: "Sync strategies that survive a week at sea.".to_string(),
                published_at: "2022-09-18".to_string(),
                tags: strings(&["mobile"]),
                reading_time: 11,
                featured: false,
                url: None,
            },
        ],
    }
}
