//! Session and dispatch tests
//!
//! End-to-end runs through project resolution, the session state machine and
//! the rewriter, with dispatch captured instead of spawned.

use std::path::{Path, PathBuf};

use dcr::compose::GroupMap;
use dcr::config::{ComposeTool, ProjectStore, Settings};
use dcr::dispatch::{ComposeInvocation, Dispatcher};
use dcr::error::{DcrError, Result};
use dcr::rewrite::expand_groups;
use dcr::session::{Flow, Project, ProjectSelector, Session};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    invocations: Vec<ComposeInvocation>,
    fail_with: Option<i32>,
}

impl Dispatcher for Recorder {
    fn dispatch(&mut self, invocation: &ComposeInvocation) -> Result<()> {
        self.invocations.push(invocation.clone());
        match self.fail_with {
            Some(code) => Err(DcrError::ToolFailed {
                program: invocation.program().to_string(),
                code: Some(code),
            }),
            None => Ok(()),
        }
    }
}

struct Workspace {
    _root: tempfile::TempDir,
    project_dir: PathBuf,
    store: ProjectStore,
}

impl Workspace {
    fn new(groups: Option<&str>) -> Self {
        let root = tempfile::tempdir().unwrap();
        let project_dir = root.path().join("shop");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(
            project_dir.join("docker-compose.yml"),
            "services:\n  api:\n    image: api\n  worker:\n    image: worker\n",
        )
        .unwrap();
        if let Some(content) = groups {
            std::fs::write(project_dir.join(".dcrgroups"), content).unwrap();
        }
        let store = ProjectStore::open(root.path().join("config")).unwrap();
        Self {
            _root: root,
            project_dir,
            store,
        }
    }

    fn compose_file(&self) -> PathBuf {
        self.project_dir.join("docker-compose.yml")
    }

    fn session(&self, selector: ProjectSelector, dispatcher: Recorder) -> Session<Recorder> {
        let project =
            Project::resolve(&selector, &Settings::default(), &self.store, &self.project_dir)
                .unwrap();
        Session::open(project, self.store.clone(), ComposeTool::Docker, dispatcher).unwrap()
    }

    fn discover(&self) -> Session<Recorder> {
        self.session(ProjectSelector::default(), Recorder::default())
    }
}

fn words(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

fn full_args(invocation: &ComposeInvocation) -> Vec<String> {
    let mut args = vec![invocation.program().to_string()];
    args.extend(invocation.arguments());
    args
}

// =============================================================================
// Dispatch Scenarios
// =============================================================================

mod dispatch_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_restart_group_dispatches_members() {
        let ws = Workspace::new(Some("groups:\n  backend: [api, worker]\n"));
        let mut session = ws.discover();

        assert_eq!(session.handle_line("restart backend").unwrap(), Flow::Continue);

        let file = ws.compose_file().to_string_lossy().into_owned();
        assert_eq!(
            full_args(&session.dispatcher().invocations[0]),
            vec!["docker", "compose", "-f", file.as_str(), "restart", "api", "worker"]
        );
    }

    #[test]
    fn test_without_group_document_args_pass_through() {
        let ws = Workspace::new(None);
        let mut session = ws.discover();
        assert!(!session.documents().has_groups());

        session.handle_line("logs api").unwrap();

        let file = ws.compose_file().to_string_lossy().into_owned();
        assert_eq!(
            full_args(&session.dispatcher().invocations[0]),
            vec!["docker", "compose", "-f", file.as_str(), "logs", "api"]
        );
    }

    #[test]
    fn test_malformed_group_document_disables_expansion() {
        let ws = Workspace::new(Some("groups: nope\n"));
        let mut session = ws.discover();

        session.handle_line("stop backend").unwrap();
        assert_eq!(session.dispatcher().invocations[0].args, words("stop backend"));
    }

    #[test]
    fn test_override_and_env_files_are_passed() {
        let ws = Workspace::new(None);
        let over = ws.project_dir.join("docker-compose.override.yml");
        let env = ws.project_dir.join(".env");
        std::fs::write(&over, "services: {}\n").unwrap();
        std::fs::write(&env, "TAG=dev\n").unwrap();

        let mut session = ws.discover();
        session.handle_line("ps").unwrap();

        let invocation = &session.dispatcher().invocations[0];
        assert_eq!(invocation.override_file, Some(over));
        assert_eq!(invocation.env_file, Some(env));
    }

    #[test]
    fn test_one_shot_arguments_keep_spacing() {
        let ws = Workspace::new(None);
        let mut session = ws.discover();

        let args = vec![
            "exec".to_string(),
            "api".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            "echo hello world".to_string(),
        ];
        session.handle_args(args.clone()).unwrap();
        assert_eq!(session.dispatcher().invocations[0].args, args);
    }

    #[test]
    fn test_tool_failure_keeps_session_usable() {
        let ws = Workspace::new(None);
        let recorder = Recorder {
            fail_with: Some(3),
            ..Default::default()
        };
        let mut session = ws.session(ProjectSelector::default(), recorder);

        let err = session.handle_line("up -d").unwrap_err();
        assert!(matches!(err, DcrError::ToolFailed { code: Some(3), .. }));
        assert_eq!(session.handle_line("exit").unwrap(), Flow::Exit);
    }

    #[test]
    fn test_help_is_forwarded() {
        let ws = Workspace::new(None);
        let mut session = ws.discover();
        session.handle_line("help up").unwrap();
        assert_eq!(session.dispatcher().invocations[0].args, words("help up"));
    }

    #[test]
    fn test_builtins_do_not_dispatch() {
        let ws = Workspace::new(None);
        let mut session = ws.discover();
        for line in ["", "   ", "services", "reload"] {
            session.handle_line(line).unwrap();
        }
        assert!(session.dispatcher().invocations.is_empty());
    }
}

// =============================================================================
// Projects
// =============================================================================

mod project_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_discovered_project_reopens_by_name() {
        let ws = Workspace::new(Some("groups:\n  all: [api, worker]\n"));
        drop(ws.discover());

        let selector = ProjectSelector {
            name: Some("shop".into()),
            ..Default::default()
        };
        let mut session = ws.session(selector, Recorder::default());
        assert_eq!(session.project().compose_file, ws.compose_file());

        session.handle_line("pull all").unwrap();
        assert_eq!(session.dispatcher().invocations[0].args, words("pull api worker"));
    }

    #[test]
    fn test_alias_then_reopen() {
        let ws = Workspace::new(None);
        let mut session = ws.discover();

        assert_eq!(session.handle_line("alias s").unwrap(), Flow::Reloaded);
        assert_eq!(session.history_path(), ws.store.history_path("s"));

        let reopened = ws.store.resolve("s").unwrap();
        assert_eq!(reopened.compose_file, ws.compose_file());
        let names: Vec<String> = ws.store.list().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["s", "shop"]);
    }

    #[test]
    fn test_alias_with_extra_names_uses_first() {
        let ws = Workspace::new(None);
        let mut session = ws.discover();

        assert_eq!(session.handle_line("alias a b").unwrap(), Flow::Reloaded);
        assert_eq!(session.project().name, "a");
        assert!(ws.store.exists("a"));
        assert!(!ws.store.exists("b"));
        assert!(session.dispatcher().invocations.is_empty());
    }

    #[test]
    fn test_alias_back_onto_original_name() {
        let ws = Workspace::new(None);
        let mut session = ws.discover();
        std::fs::write(ws.store.history_path("shop"), "ps\n").unwrap();

        session.handle_line("alias s").unwrap();
        assert_eq!(session.handle_line("alias shop").unwrap(), Flow::Reloaded);

        assert_eq!(session.project().name, "shop");
        assert_eq!(
            std::fs::read_to_string(ws.store.history_path("shop")).unwrap(),
            "ps\n"
        );
        assert_eq!(ws.store.resolve("shop").unwrap().compose_file, ws.compose_file());
    }

    #[test]
    fn test_unknown_name_is_fatal() {
        let ws = Workspace::new(None);
        let selector = ProjectSelector {
            name: Some("nowhere".into()),
            ..Default::default()
        };
        let result = Project::resolve(
            &selector,
            &Settings::default(),
            &ws.store,
            Path::new("/"),
        );
        assert!(matches!(result, Err(DcrError::UnknownProject(_))));
    }
}

// =============================================================================
// Rewriter Properties
// =============================================================================

mod rewrite_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn groups() -> GroupMap {
        let mut groups = GroupMap::new();
        groups.insert("g".into(), words("s1 s2"));
        groups.insert("h".into(), words("s3"));
        groups
    }

    #[test]
    fn test_members_appended_and_group_removed() {
        let cases = ["up g", "up -d g web", "g", "logs a g b c", "stop h g x"];
        for case in cases {
            let args = words(case);
            let out = expand_groups(&args, &groups());
            assert!(!out.contains(&"g".to_string()), "{}", case);

            let s1 = out.iter().position(|a| a == "s1").unwrap();
            let s2 = out.iter().position(|a| a == "s2").unwrap();
            assert_eq!(s2, s1 + 1, "{}", case);

            let others: Vec<&String> = args.iter().filter(|a| *a != "g" && *a != "h").collect();
            let kept: Vec<&String> = out.iter().filter(|a| others.contains(a)).collect();
            assert_eq!(kept, others, "{}", case);
        }
    }

    #[test]
    fn test_idempotent() {
        for case in ["up g h", "restart x", "h g h"] {
            let once = expand_groups(&words(case), &groups());
            assert_eq!(expand_groups(&once, &groups()), once);
        }
    }
}
