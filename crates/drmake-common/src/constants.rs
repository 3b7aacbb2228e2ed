//! Manifest keywords, default paths, and container mount points.

/// Default manifest file name, relative to the invocation directory.
pub const DEFAULT_MANIFEST: &str = "Makefile.phd";

/// Workspace-relative directory holding `&name` recipe directories.
pub const WORKSPACE_TARGETS_DIR: &str = ".drmake/targets";

/// Conventional recipe file read from workspace and path references.
pub const RECIPE_FILE_NAME: &str = "Dockerfile";

/// Header keyword opening a new target.
pub const HEADER_KEYWORD: &str = "FROM";

/// Header keyword introducing an explicit target name.
pub const NAME_KEYWORD: &str = "AS";

/// Header keyword introducing the dependency list.
pub const DEPS_KEYWORD: &str = "USING";

/// Body keyword declaring an artifact to copy back to the host.
pub const ARTIFACT_KEYWORD: &str = "ARTIFACT";

/// Body keyword for the argument-plus-environment shorthand.
pub const ARGUMENT_KEYWORD: &str = "ARGENV";

/// Body keyword for metadata lines.
pub const METADATA_KEYWORD: &str = "LABEL";

/// Metadata key whose value becomes a target's description.
pub const DESCRIPTION_KEY: &str = "description";

/// Sigil for a same-file target reference (`#name`).
pub const TARGET_SIGIL: char = '#';

/// Sigil for a workspace recipe-directory reference (`&name`).
pub const WORKSPACE_SIGIL: char = '&';

/// Prefix for a filesystem path reference (`./path`).
pub const PATH_PREFIX: &str = "./";

/// Mount point of the work volume inside build containers.
pub const WORK_MOUNT: &str = "/work";

/// Mount point of the host base directory inside the copy helper.
pub const HOST_MOUNT: &str = "/srv";

/// Image used by the artifact copy helper container.
pub const COPY_HELPER_IMAGE: &str = "alpine";

/// Prefix of every generated image and volume name.
pub const APP_NAME: &str = "drmake";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "drmake";
