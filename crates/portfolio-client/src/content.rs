//! Static portfolio copy shown in the room panels and the overview page.

use portfolio_logic::rooms::RoomTable;
use portfolio_logic::showcase::{average_level, Project, ProjectsView, SkillsView};

pub const OWNER: &str = "Portfolio Owner";
pub const TAGLINE: &str = "Software Engineer | Automation & 3D Experiences";

pub const INTRO_LINES: [&str; 15] = [
    "$ whoami",
    "guest@neon-portfolio:~$ ",
    "",
    "Portfolio Owner | Software Engineer",
    "Specializing in Automation & 3D Experiences",
    "",
    "Systems Online:",
    "├── SKILLS Lab      [✓]",
    "├── PROJECTS        [✓]",
    "├── CONTACT         [✓]",
    "└── AI LAB          [✓]",
    "",
    "$ explore --elevator",
    "Elevator ready ↑ Welcome aboard!",
    "guest@neon-portfolio:~$ _",
];

/// `[#######...]` style bar, `width` cells wide.
pub fn level_bar(level: u8, width: usize) -> String {
    let filled = (level as usize * width + 50) / 100;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn skills_text(view: &SkillsView) -> String {
    let mut out = format!("SKILLS LAB   [{}]\n\n", view.filter_label());
    let skills = view.visible();
    let mut category = None;
    for s in &skills {
        if category != Some(s.category) {
            category = Some(s.category);
            out.push_str(&format!("{}\n", s.category.label()));
        }
        out.push_str(&format!(
            "  {:<14} {} {}%\n",
            s.name,
            level_bar(s.level, 10),
            s.level
        ));
    }
    out.push_str(&format!(
        "\n{} technologies, average level {}%\nTab: next category",
        skills.len(),
        average_level(&skills)
    ));
    out
}

pub fn projects_text(view: &ProjectsView) -> String {
    if let Some(p) = view.selected() {
        return project_detail(p);
    }
    let mut out = format!("PROJECTS   [{}]\n\n", view.filter_label());
    for (i, p) in view.visible().iter().enumerate() {
        out.push_str(&format!(
            "{}. {}  [{}]\n    {} · {}\n",
            i + 1,
            p.title,
            p.status.label(),
            p.summary,
            p.category
        ));
    }
    out.push_str("\nTab: next category   1-9: open project");
    out
}

fn project_detail(p: &Project) -> String {
    format!(
        "{}\n{} · {} · {}\n\n{}\n\nTech: {}\nStars {}   Forks {}\n\nBackspace: back to list",
        p.title,
        p.year,
        p.status.label(),
        p.language,
        p.details,
        p.technologies.join(", "),
        p.stars,
        p.forks
    )
}

/// The plain, non-3D page shown in `Stage::Overview`.
pub fn overview_text(rooms: &RoomTable) -> String {
    let mut out = format!("{OWNER}\n{TAGLINE}\n\n");
    out.push_str("Sections: ");
    let names: Vec<&str> = rooms.iter().map(|r| r.name).collect();
    out.push_str(&names.join(" · "));
    out.push_str("\n\n");
    out.push_str(&skills_text(&SkillsView::default()));
    out.push_str("\n\n");
    out.push_str(&projects_text(&ProjectsView::default()));
    out.push_str("\nPress Esc to return to the immersive view.");
    out
}
