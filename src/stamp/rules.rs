//! Ignore rules consulted by the walker and the eligibility filter.
//!
//! The built-in tables are process-wide constants. A [`Config`] may extend
//! them, never shrink them.

use std::collections::HashSet;

use super::config::Config;

/// Directory names whose whole subtree is pruned from the walk.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "__pycache__",
    ".vscode",
    ".idea",
    "coverage",
    ".husky",
    ".github",
    "public",
    "out",
    "logs",
    ".turbo",
    ".vercel",
    "vendor",
    "temp",
    "tmp",
    ".svn",
    ".hg",
    "node_modules.cache",
];

/// Exact file names that are never annotated.
pub const IGNORED_FILES: &[&str] = &[
    // Next.js
    "next-env.d.ts",
    "next.config.mjs",
    "next.config.js",
    // Package managers
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    // Tool configuration
    ".gitignore",
    ".eslintrc.json",
    ".eslintrc.js",
    ".prettierrc",
    "tsconfig.json",
    "postcss.config.js",
    "postcss.config.mjs",
    "tailwind.config.js",
    "tailwind.config.ts",
    "jest.config.js",
    "babel.config.js",
    "vite.config.ts",
    "components.json",
    // Environment
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    // Other
    ".DS_Store",
    ".npmrc",
    ".nvmrc",
    ".cursorignore",
    "README.md",
    "LICENSE",
    "global.d.ts",
    "CHANGELOG.md",
    "CONTRIBUTING.md",
    IGNORE_FILE_NAME,
];

/// File extensions (lowercase, with leading dot) that are never annotated.
pub const IGNORED_EXTENSIONS: &[&str] = &[
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".webp",
    // Documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".csv",
    // Archives
    ".zip", ".tar", ".gz", ".rar", ".7z",
    // Media
    ".mp3", ".mp4", ".wav", ".avi", ".mov", ".webm",
    // Fonts
    ".ttf", ".woff", ".woff2", ".eot", ".otf",
    // Compiled
    ".pyc", ".pyo", ".pyd", ".dll", ".exe", ".so",
    // Other
    ".lock", ".map", ".min.js", ".min.css",
    // Binary
    ".bin", ".dat", ".db", ".sqlite",
    // Backup
    ".bak", ".backup", ".tmp",
];

/// Extensions trusted to be text without sniffing their content.
pub const TEXT_FILE_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".mjs",
    ".css", ".scss", ".less", ".sass",
    ".html", ".htm", ".xml",
    ".json", ".yaml", ".yml",
    ".md", ".mdx", ".txt",
    ".sh", ".bash", ".zsh",
    ".env",
    ".vue", ".svelte",
    ".astro",
    ".php",
    ".rs",
    ".go",
];

/// Extensions whose annotation uses `#` instead of `//`.
pub const HASH_COMMENT_EXTENSIONS: &[&str] = &[
    ".py", ".rb", ".sh", ".yml", ".yaml", ".conf", ".toml", ".ini",
];

/// Suffixes of backup and temporary files, including our own artifacts.
pub const BACKUP_SUFFIXES: &[&str] = &[".bak", ".backup", ".tmp"];

/// Suffix appended to a file's path to name its backup artifact.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Per-directory gitignore-style exclusion file.
pub const IGNORE_FILE_NAME: &str = ".stampignore";

/// Files larger than this many bytes are skipped.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Lowercased extension of `name` including the leading dot, the way the
/// filters compare it. Leading-dot names such as `.env` have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    let trimmed = name.trim_start_matches('.');
    let dot = trimmed.rfind('.')?;
    Some(trimmed[dot..].to_ascii_lowercase())
}

/// Whether `name` carries one of the extensions in `table`.
pub fn has_extension_in(name: &str, table: &[&str]) -> bool {
    extension_of(name).is_some_and(|ext| table.contains(&ext.as_str()))
}

/// Resolved ignore rules for a run
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    dirs: HashSet<String>,
    files: HashSet<String>,
    extensions: HashSet<String>,
    max_file_size: u64,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            dirs: IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            files: IGNORED_FILES.iter().map(|s| s.to_string()).collect(),
            extensions: IGNORED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl IgnoreRules {
    /// Built-in tables extended by the configured extras
    pub fn from_config(config: &Config) -> Self {
        let mut rules = Self::default();
        rules.dirs.extend(config.extra_ignored_dirs.iter().cloned());
        rules.files.extend(config.extra_ignored_files.iter().cloned());
        rules.extensions.extend(
            config
                .extra_ignored_extensions
                .iter()
                .map(|ext| normalize_extension(ext)),
        );
        rules.max_file_size = config.max_file_size;
        rules
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Matches the last extension case-insensitively, plus compound
    /// extensions such as `.min.js` against the end of the name.
    pub fn is_ignored_extension(&self, name: &str) -> bool {
        if let Some(ext) = extension_of(name) {
            if self.extensions.contains(&ext) {
                return true;
            }
        }
        let lower = name.to_ascii_lowercase();
        self.extensions
            .iter()
            .filter(|ext| ext.matches('.').count() > 1)
            .any(|ext| lower.ends_with(ext.as_str()))
    }
}

fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_ascii_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
