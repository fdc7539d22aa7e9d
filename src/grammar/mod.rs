//! Command grammar table
//!
//! Describes, for every subcommand the REPL knows, which flags may follow it
//! and whether it takes service names. Flags and shapes are fixed; only the
//! service and group names come from the loaded project.

use std::collections::BTreeMap;

/// What may follow the subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Children {
    /// Nothing is completed after the subcommand
    None,
    /// Service and group names
    Services,
    /// `service=` forms, for scale factors
    ServiceAssignments,
}

/// Fixed shape of one subcommand
#[derive(Debug, Clone, Copy)]
struct Shape {
    name: &'static str,
    children: Children,
    flags: &'static [&'static str],
    recurses: bool,
}

const fn builtin(name: &'static str) -> Shape {
    Shape {
        name,
        children: Children::None,
        flags: &[],
        recurses: false,
    }
}

const fn services(name: &'static str, flags: &'static [&'static str]) -> Shape {
    Shape {
        name,
        children: Children::Services,
        flags,
        recurses: true,
    }
}

const fn single_service(name: &'static str, flags: &'static [&'static str]) -> Shape {
    Shape {
        name,
        children: Children::Services,
        flags,
        recurses: false,
    }
}

const SHAPES: &[Shape] = &[
    // REPL builtins
    builtin("alias"),
    builtin("services"),
    builtin("reload"),
    builtin("help"),
    builtin("exit"),
    // Compose subcommands
    builtin("version"),
    builtin("bundle"),
    builtin("config"),
    builtin("down"),
    services(
        "build",
        &["--build-arg=", "--no-cache", "--progress=", "--pull", "--quiet"],
    ),
    services(
        "create",
        &["--build", "--force-recreate", "--no-build", "--no-recreate"],
    ),
    services("events", &["--json"]),
    single_service(
        "exec",
        &[
            "-T", "-d", "--detach", "--env=", "--index=", "--no-TTY", "--privileged",
            "--user=", "--workdir=",
        ],
    ),
    services("kill", &["--remove-orphans", "--signal="]),
    services(
        "logs",
        &[
            "-f", "--follow", "--no-color", "--since=", "--tail=", "--timestamps", "--until=",
        ],
    ),
    services("pause", &[]),
    single_service("port", &["--index=", "--protocol="]),
    services(
        "ps",
        &["-a", "-q", "--all", "--format=", "--quiet", "--services", "--status="],
    ),
    services("pull", &["--ignore-pull-failures", "--include-deps", "--quiet"]),
    services("push", &["--ignore-push-failures", "--include-deps"]),
    services("restart", &["--no-deps", "--timeout="]),
    services(
        "rm",
        &["-f", "-s", "-v", "--force", "--stop", "--volumes"],
    ),
    single_service(
        "run",
        &[
            "-d", "--detach", "--entrypoint=", "--env=", "--name=", "--no-deps", "--rm",
            "--service-ports", "--user=", "--volume=", "--workdir=",
        ],
    ),
    Shape {
        name: "scale",
        children: Children::ServiceAssignments,
        flags: &["--no-deps"],
        recurses: true,
    },
    services("start", &[]),
    services("stop", &["--timeout="]),
    services("top", &[]),
    services("unpause", &[]),
    services(
        "up",
        &[
            "-d", "--abort-on-container-exit", "--build", "--detach", "--force-recreate",
            "--no-build", "--no-deps", "--remove-orphans", "--scale=", "--timeout=", "--wait",
        ],
    ),
];

/// Syntax of one subcommand, with its children resolved for this session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub accepts_children: bool,
    pub children: Vec<String>,
    pub flags: Vec<String>,
    /// More than one child may follow; otherwise the first child ends completion
    pub recurses_into_children: bool,
}

/// Subcommand name to spec, in lexicographic order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarTable {
    commands: BTreeMap<String, CommandSpec>,
}

impl GrammarTable {
    /// Build the table for a session.
    ///
    /// `services` should be sorted; `groups` are offered next to services
    /// wherever plain service names are accepted.
    pub fn build(services: &[String], groups: &[String]) -> Self {
        let mut names: Vec<String> = services.iter().chain(groups).cloned().collect();
        names.sort();
        names.dedup();

        let assignments: Vec<String> = services.iter().map(|s| format!("{}=", s)).collect();

        let commands = SHAPES
            .iter()
            .map(|shape| {
                let children = match shape.children {
                    Children::None => Vec::new(),
                    Children::Services => names.clone(),
                    Children::ServiceAssignments => assignments.clone(),
                };
                let spec = CommandSpec {
                    name: shape.name.to_string(),
                    accepts_children: shape.children != Children::None,
                    children,
                    flags: shape.flags.iter().map(|f| f.to_string()).collect(),
                    recurses_into_children: shape.recurses,
                };
                (shape.name.to_string(), spec)
            })
            .collect();

        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Subcommand names in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
