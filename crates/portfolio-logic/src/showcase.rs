//! Skills and projects catalogue with the filters the SKILLS and PROJECTS
//! rooms browse by.
//!
//! ```
//! use portfolio_logic::showcase::{filter_skills, SkillCategory};
//!
//! assert_eq!(filter_skills(Some(SkillCategory::Gis)).len(), 4);
//! assert_eq!(filter_skills(None).len(), 16);
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkillCategory {
    WebDev,
    Backend,
    Automation,
    Gis,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::WebDev,
        SkillCategory::Backend,
        SkillCategory::Automation,
        SkillCategory::Gis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::WebDev => "Web Dev",
            SkillCategory::Backend => "Backend",
            SkillCategory::Automation => "Automation",
            SkillCategory::Gis => "GIS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub category: SkillCategory,
    /// 0..=100
    pub level: u8,
    pub description: &'static str,
}

const fn skill(
    name: &'static str,
    category: SkillCategory,
    level: u8,
    description: &'static str,
) -> Skill {
    Skill {
        name,
        category,
        level,
        description,
    }
}

pub const SKILLS: [Skill; 16] = [
    skill("React/Next.js", SkillCategory::WebDev, 95, "Advanced React patterns & Next.js optimization"),
    skill("TypeScript", SkillCategory::WebDev, 90, "Type-safe application development"),
    skill("Node.js", SkillCategory::WebDev, 85, "Server-side JavaScript & APIs"),
    skill("Three.js", SkillCategory::WebDev, 80, "3D graphics and interactive experiences"),
    skill("Python", SkillCategory::Backend, 90, "Backend development & data processing"),
    skill("PostgreSQL", SkillCategory::Backend, 85, "Database design & optimization"),
    skill("GraphQL", SkillCategory::Backend, 80, "Efficient API development"),
    skill("Redis", SkillCategory::Backend, 75, "Caching & session management"),
    skill("Docker", SkillCategory::Automation, 88, "Containerization & deployment"),
    skill("CI/CD", SkillCategory::Automation, 85, "Automated deployment pipelines"),
    skill("AWS", SkillCategory::Automation, 82, "Cloud infrastructure & services"),
    skill("Terraform", SkillCategory::Automation, 78, "Infrastructure as Code"),
    skill("QGIS", SkillCategory::Gis, 90, "Geographic information systems"),
    skill("PostGIS", SkillCategory::Gis, 85, "Spatial database extensions"),
    skill("Leaflet", SkillCategory::Gis, 80, "Interactive web mapping"),
    skill("GeoServer", SkillCategory::Gis, 75, "Geospatial data serving"),
];

/// `None` is "All".
pub fn filter_skills(category: Option<SkillCategory>) -> Vec<&'static Skill> {
    SKILLS
        .iter()
        .filter(|s| category.map_or(true, |c| s.category == c))
        .collect()
}

pub fn average_level(skills: &[&Skill]) -> u8 {
    if skills.is_empty() {
        return 0;
    }
    let total: u32 = skills.iter().map(|s| u32::from(s.level)).sum();
    (total / skills.len() as u32) as u8
}

/// Steps `None -> first -> ... -> last -> None`.
fn cycle<T: Copy + PartialEq>(current: Option<T>, options: &[T]) -> Option<T> {
    match current.and_then(|c| options.iter().position(|o| *o == c)) {
        None => options.first().copied(),
        Some(i) => options.get(i + 1).copied(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillsView {
    pub filter: Option<SkillCategory>,
}

impl SkillsView {
    pub fn next_filter(&mut self) {
        self.filter = cycle(self.filter, &SkillCategory::ALL);
    }

    pub fn filter_label(&self) -> &'static str {
        self.filter.map_or("All", SkillCategory::label)
    }

    pub fn visible(&self) -> Vec<&'static Skill> {
        filter_skills(self.filter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Archived,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::InProgress => "IN-PROGRESS",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: usize,
    pub title: &'static str,
    pub summary: &'static str,
    pub details: &'static str,
    pub technologies: &'static [&'static str],
    pub category: &'static str,
    pub year: u16,
    pub status: ProjectStatus,
    pub language: &'static str,
    pub stars: u32,
    pub forks: u32,
}

pub const PROJECTS: [Project; 6] = [
    Project {
        id: 1,
        title: "Neon Portfolio 3D",
        summary: "Immersive cyberpunk portfolio with Three.js",
        details: "A futuristic 3D portfolio experience with vertical room navigation, neon aesthetics, and interactive 3D elements.",
        technologies: &["Next.js", "Three.js", "GSAP", "TypeScript", "Tailwind CSS"],
        category: "Web Development",
        year: 2024,
        status: ProjectStatus::Completed,
        language: "TypeScript",
        stars: 247,
        forks: 42,
    },
    Project {
        id: 2,
        title: "GeoSpatial Analytics Platform",
        summary: "Real-time geospatial data visualization",
        details: "A platform for analyzing and visualizing geospatial data with real-time updates, interactive maps, and advanced analytics.",
        technologies: &["React", "PostGIS", "Leaflet", "Python", "FastAPI"],
        category: "GIS",
        year: 2024,
        status: ProjectStatus::Completed,
        language: "Python",
        stars: 189,
        forks: 31,
    },
    Project {
        id: 3,
        title: "AI-Powered Automation Suite",
        summary: "Intelligent workflow automation system",
        details: "An automation platform that streamlines business processes using machine learning and natural language processing.",
        technologies: &["Python", "TensorFlow", "Docker", "Redis", "PostgreSQL"],
        category: "AI/ML",
        year: 2023,
        status: ProjectStatus::InProgress,
        language: "Python",
        stars: 156,
        forks: 28,
    },
    Project {
        id: 4,
        title: "Cyberpunk Game Engine",
        summary: "WebGL-based 3D game engine",
        details: "A lightweight 3D game engine featuring physics simulation, particle systems, and shader effects.",
        technologies: &["WebGL", "JavaScript", "GLSL", "Web Audio API"],
        category: "Game Development",
        year: 2023,
        status: ProjectStatus::Completed,
        language: "JavaScript",
        stars: 324,
        forks: 67,
    },
    Project {
        id: 5,
        title: "Cloud Infrastructure Manager",
        summary: "Multi-cloud deployment orchestration",
        details: "Manages and orchestrates deployments across multiple cloud providers with automated scaling and monitoring.",
        technologies: &["Terraform", "Kubernetes", "AWS", "Azure", "Monitoring"],
        category: "DevOps",
        year: 2024,
        status: ProjectStatus::InProgress,
        language: "Go",
        stars: 98,
        forks: 19,
    },
    Project {
        id: 6,
        title: "Neural Network Visualizer",
        summary: "Interactive ML model visualization",
        details: "A web tool for exploring neural network architectures with real-time training visualization and model analysis.",
        technologies: &["D3.js", "Python", "TensorFlow", "WebGL", "FastAPI"],
        category: "Machine Learning",
        year: 2023,
        status: ProjectStatus::Completed,
        language: "Python",
        stars: 445,
        forks: 89,
    },
];

/// Distinct project categories in catalogue order.
pub fn project_categories() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for p in PROJECTS.iter() {
        if !out.contains(&p.category) {
            out.push(p.category);
        }
    }
    out
}

pub fn filter_projects(category: Option<&str>) -> Vec<&'static Project> {
    PROJECTS
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect()
}

/// Category filter plus the project opened in the detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectsView {
    pub filter: Option<&'static str>,
    selected: Option<usize>,
}

impl ProjectsView {
    /// Cycle the category filter. A selection the new filter hides is closed.
    pub fn next_filter(&mut self) {
        self.filter = cycle(self.filter, &project_categories());
        if let Some(selected) = self.selected() {
            if !self.visible().iter().any(|p| p.id == selected.id) {
                self.selected = None;
            }
        }
    }

    pub fn filter_label(&self) -> &'static str {
        self.filter.unwrap_or("All")
    }

    pub fn visible(&self) -> Vec<&'static Project> {
        filter_projects(self.filter)
    }

    /// Open the `n`th visible project (1-based). Out-of-range input is ignored.
    pub fn open(&mut self, n: usize) -> Option<&'static Project> {
        let project = n.checked_sub(1).and_then(|i| self.visible().get(i).copied())?;
        self.selected = Some(project.id);
        Some(project)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&'static Project> {
        self.selected
            .and_then(|id| PROJECTS.iter().find(|p| p.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_filter_by_category() {
        for category in SkillCategory::ALL {
            let skills = filter_skills(Some(category));
            assert_eq!(skills.len(), 4, "{category:?}");
            assert!(skills.iter().all(|s| s.category == category));
        }
        assert_eq!(filter_skills(None).len(), SKILLS.len());
    }

    #[test]
    fn skills_view_cycles_back_to_all() {
        let mut view = SkillsView::default();
        assert_eq!(view.filter_label(), "All");
        let labels: Vec<&str> = (0..5)
            .map(|_| {
                view.next_filter();
                view.filter_label()
            })
            .collect();
        assert_eq!(labels, vec!["Web Dev", "Backend", "Automation", "GIS", "All"]);
    }

    #[test]
    fn average_of_filtered_skills() {
        assert_eq!(average_level(&filter_skills(Some(SkillCategory::Backend))), 82);
        assert_eq!(average_level(&[]), 0);
    }

    #[test]
    fn project_categories_are_distinct_in_order() {
        assert_eq!(
            project_categories(),
            vec![
                "Web Development",
                "GIS",
                "AI/ML",
                "Game Development",
                "DevOps",
                "Machine Learning"
            ]
        );
    }

    #[test]
    fn project_filter_by_category() {
        let gis = filter_projects(Some("GIS"));
        assert_eq!(gis.len(), 1);
        assert_eq!(gis[0].title, "GeoSpatial Analytics Platform");
        assert!(filter_projects(Some("Nope")).is_empty());
        assert_eq!(filter_projects(None).len(), PROJECTS.len());

        let mut total = 0;
        for category in project_categories() {
            let projects = filter_projects(Some(category));
            assert!(!projects.is_empty(), "{category}");
            assert!(projects.iter().all(|p| p.category == category));
            total += projects.len();
        }
        assert_eq!(total, PROJECTS.len());
    }

    #[test]
    fn open_indexes_the_visible_list() {
        let mut view = ProjectsView::default();
        assert_eq!(view.open(4).map(|p| p.title), Some("Cyberpunk Game Engine"));
        assert_eq!(view.selected().map(|p| p.status), Some(ProjectStatus::Completed));
        assert!(view.open(0).is_none());
        assert!(view.open(7).is_none());
        assert_eq!(view.selected().map(|p| p.id), Some(4));
        view.close();
        assert!(view.selected().is_none());
    }

    #[test]
    fn filter_change_closes_hidden_selection() {
        let mut view = ProjectsView::default();
        view.open(1);
        view.next_filter(); // Web Development: project 1 still visible
        assert_eq!(view.selected().map(|p| p.id), Some(1));
        view.next_filter(); // GIS
        assert!(view.selected().is_none());
        assert_eq!(view.open(1).map(|p| p.id), Some(2));
    }
}
