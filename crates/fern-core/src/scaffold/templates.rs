//! Starter file templates for new projects

/// Placeholder replaced with the project name
pub const NAME_PLACEHOLDER: &str = "{name}";

/// A file written into every new project
#[derive(Debug, Clone, Copy)]
pub struct ProjectTemplate {
    /// Destination relative to the project root
    pub path: &'static str,
    pub content: &'static str,
}

impl ProjectTemplate {
    pub fn render(&self, name: &str) -> String {
        render(self.content, name)
    }
}

/// Files written by `fern create`, in write order
pub const PROJECT_TEMPLATES: &[ProjectTemplate] = &[
    ProjectTemplate {
        path: "fern.yaml",
        content: include_str!("../../templates/project/fern.yaml"),
    },
    ProjectTemplate {
        path: "lib/main.cpp",
        content: include_str!("../../templates/project/main.cpp"),
    },
    ProjectTemplate {
        path: "README.md",
        content: include_str!("../../templates/project/README.md"),
    },
    ProjectTemplate {
        path: ".gitignore",
        content: include_str!("../../templates/project/gitignore"),
    },
];

/// Substitute every `{name}` occurrence verbatim
pub fn render(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}
