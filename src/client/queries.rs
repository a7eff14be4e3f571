//! GraphQL documents sent to the build publisher.

macro_rules! build_fields {
    () => {
        "id machine keep published tags submitted completed"
    };
}

pub const MACHINES: &str = "query { machines { machine buildCount } }";

pub const BUILDS: &str = concat!(
    "query ($machine: String!) { builds(machine: $machine) { ",
    build_fields!(),
    " } }"
);

pub const BUILD: &str = concat!(
    "query ($id: ID!) { build(id: $id) { ",
    build_fields!(),
    " } }"
);

pub const LATEST: &str = concat!(
    "query ($machine: String!) { latest(machine: $machine) { ",
    build_fields!(),
    " } }"
);

pub const RESOLVE_TAG: &str = concat!(
    "query ($machine: String!, $tag: String!) { resolveBuildTag(machine: $machine, tag: $tag) { ",
    build_fields!(),
    " } }"
);

pub const PACKAGES: &str = "query ($id: ID!) { packages(id: $id) }";

pub const NOTE: &str = "query ($id: ID!) { build(id: $id) { id notes } }";

pub const LOGS: &str = "query ($id: ID!) { build(id: $id) { id logs } }";

pub const PUBLISH: &str = "mutation ($id: ID!) { publish(id: $id) { id } }";

pub const PULL: &str = "mutation ($id: ID!) { pull(id: $id) { id } }";

pub const KEEP: &str = "mutation ($id: ID!) { keepBuild(id: $id) { id } }";

pub const RELEASE: &str = "mutation ($id: ID!) { releaseBuild(id: $id) { id } }";

pub const TAG: &str = "mutation ($id: ID!, $tag: String!) { tagBuild(id: $id, tag: $tag) { id } }";

pub const UNTAG: &str =
    "mutation ($machine: String!, $tag: String!) { untagBuild(machine: $machine, tag: $tag) { machine } }";

pub const CREATE_NOTE: &str =
    "mutation ($id: ID!, $note: String) { createNote(id: $id, note: $note) { id } }";

pub const SCHEDULE_BUILD: &str = "mutation ($machine: String!) { scheduleBuild(machine: $machine) }";
