//! Pure translation of a menu description into a picker argument list.

use crate::config::{MenuConfig, MenuKind, MenuSettings};

/// Build the argument list for the picker invocation.
///
/// Deterministic and side-effect free: identical inputs always produce the
/// identical argv, and a flag is present iff the corresponding config field
/// was set. `placeholder` forces dmenu mode so a loading screen can reuse
/// the exact same styling flags while switching mode.
pub fn build_command(config: &MenuConfig, placeholder: bool, settings: &MenuSettings) -> Vec<String> {
    let mut argv: Vec<String> = Vec::new();

    if config.kind == MenuKind::Default && !placeholder {
        argv.push("-show".into());
        argv.push("drun".into());
    } else {
        argv.push("-dmenu".into());
    }

    if let Some(prompt) = &config.prompt {
        argv.push("-p".into());
        argv.push(prompt.clone());
    }

    if let Some(max) = config.max_lines {
        argv.push("-lines".into());
        argv.push(max.to_string());
    }

    if config.markup {
        argv.push("-markup-rows".into());
    }

    if let Some(sep) = &config.separator {
        argv.push("-sep".into());
        argv.push(sep.clone());
    }

    if let Some(theme) = &config.theme {
        argv.push("-theme".into());
        argv.push(settings.theme_dir.join(theme).display().to_string());
    }

    if config.insensitive {
        argv.push("-i".into());
    }

    if config.icons {
        argv.push("-show-icons".into());
    }

    if let Some(height) = config.row_height {
        argv.push("-eh".into());
        argv.push(height.to_string());
    }

    if !config.active.is_empty() {
        argv.push("-a".into());
        argv.push(join_indices(&config.active));
    }

    if !config.urgent.is_empty() {
        argv.push("-u".into());
        argv.push(join_indices(&config.urgent));
    }

    argv
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineStatus;

    fn settings() -> MenuSettings {
        MenuSettings::default().with_theme_dir("/themes")
    }

    #[test]
    fn default_kind_uses_launcher_mode() {
        let config = MenuConfig::new(MenuKind::Default);
        let argv = build_command(&config, false, &settings());
        assert_eq!(argv, vec!["-show", "drun"]);
    }

    #[test]
    fn custom_kind_uses_dmenu_mode() {
        let config = MenuConfig::new(MenuKind::Custom);
        let argv = build_command(&config, false, &settings());
        assert_eq!(argv, vec!["-dmenu"]);
    }

    #[test]
    fn placeholder_forces_dmenu_mode() {
        let config = MenuConfig::new(MenuKind::Default);
        let argv = build_command(&config, true, &settings());
        assert_eq!(argv, vec!["-dmenu"]);
    }

    #[test]
    fn flags_present_iff_set() {
        let bare = build_command(&MenuConfig::new(MenuKind::Custom), false, &settings());
        assert!(!bare.contains(&"-p".to_string()));
        assert!(!bare.contains(&"-lines".to_string()));
        assert!(!bare.contains(&"-theme".to_string()));
        assert!(!bare.contains(&"-a".to_string()));
        assert!(!bare.contains(&"-u".to_string()));

        let config = MenuConfig::new(MenuKind::Custom)
            .with_prompt("Pick")
            .with_max_lines(8)
            .with_markup()
            .with_separator("|")
            .with_theme("slate")
            .case_insensitive()
            .with_icons()
            .with_row_height(2);
        let argv = build_command(&config, false, &settings());

        assert_eq!(
            argv,
            vec![
                "-dmenu",
                "-p",
                "Pick",
                "-lines",
                "8",
                "-markup-rows",
                "-sep",
                "|",
                "-theme",
                "/themes/slate",
                "-i",
                "-show-icons",
                "-eh",
                "2",
            ]
        );
    }

    #[test]
    fn highlight_sets_join_in_insertion_order() {
        let config = MenuConfig::new(MenuKind::Custom)
            .add_line("a", Some(LineStatus::Active))
            .add_line("b", Some(LineStatus::Urgent))
            .add_line("c", Some(LineStatus::Active));
        let argv = build_command(&config, false, &settings());

        let a = argv.iter().position(|s| s == "-a").unwrap();
        assert_eq!(argv[a + 1], "0,2");
        let u = argv.iter().position(|s| s == "-u").unwrap();
        assert_eq!(argv[u + 1], "1");
    }

    #[test]
    fn identical_config_builds_identical_argv() {
        let config = MenuConfig::new(MenuKind::Custom)
            .with_prompt("Networks")
            .add_line("home", Some(LineStatus::Active))
            .add_line("office", None);

        let first = build_command(&config, false, &settings());
        let second = build_command(&config, false, &settings());
        assert_eq!(first, second);
    }
}
