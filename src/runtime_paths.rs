use std::{
    env,
    path::{Path, PathBuf},
};

pub(crate) fn current_dir_or_dot() -> PathBuf {
    match env::current_dir() {
        Ok(dir) => dir,
        Err(error) => {
            tracing::warn!("failed to read current directory, using '.': {error}");
            PathBuf::from(".")
        }
    }
}

/// Expands a leading `~` against the user's home directory.
pub(crate) fn expand_home(raw: &str) -> PathBuf {
    expand_home_with(raw, home::home_dir())
}

fn expand_home_with(raw: &str, home_dir: Option<PathBuf>) -> PathBuf {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix('~') else {
        return PathBuf::from(trimmed);
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
        // `~user/...` is left alone.
        return PathBuf::from(trimmed);
    }
    let Some(home_dir) = home_dir else {
        return PathBuf::from(trimmed);
    };

    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        home_dir
    } else {
        home_dir.join(rest)
    }
}

pub(crate) fn app_entry_path(app_dir: &Path, entry_file: &str) -> PathBuf {
    app_dir.join(entry_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_home_joins_tilde_paths() {
        let home = PathBuf::from("/home/ops");
        assert_eq!(
            expand_home_with("~/bin/node", Some(home.clone())),
            home.join("bin/node")
        );
        assert_eq!(expand_home_with("~", Some(home.clone())), home);
    }

    #[test]
    fn expand_home_leaves_other_paths_untouched() {
        let home = Some(PathBuf::from("/home/ops"));
        assert_eq!(
            expand_home_with(" /usr/bin/node ", home.clone()),
            PathBuf::from("/usr/bin/node")
        );
        assert_eq!(
            expand_home_with("~other/node", home),
            PathBuf::from("~other/node")
        );
        assert_eq!(expand_home_with("~/node", None), PathBuf::from("~/node"));
    }

    #[test]
    fn app_entry_path_joins_directory_and_file() {
        assert_eq!(
            app_entry_path(Path::new("app"), "server.js"),
            Path::new("app").join("server.js")
        );
    }
}
