//! Installing the legacy module support onto a host.

use crate::classify::{ensure_script_kind_override, extension_from_path_override};
use crate::interceptor::{bind_source_file_override, classify_assignment_override};
use crate::resolver::create_program_override;
use jsmz_host::{HostApi, HostError, HostModule};
use tracing::{debug, trace};

/// Wrap the host's entry points, once. Later calls on the same host are no-ops.
pub fn patch(host: &mut HostApi) {
    if host.is_patched() {
        trace!("host already patched");
        return;
    }
    host.mark_patched();

    host.special_assignment_kind.wrap(classify_assignment_override);
    host.binder.wrap(bind_source_file_override);
    host.script_kind.wrap(ensure_script_kind_override);
    host.extension.wrap(extension_from_path_override);
    host.program.wrap(create_program_override);
    debug!("installed legacy module support");
}

/// Load `module` into `host` with the legacy module support installed.
///
/// Without `main_method` the module loads first and the host is patched
/// afterwards. A module that runs its main entry during startup would miss
/// that, so with `main_method` the patch is armed to run right before the
/// module defines that entry.
pub fn load(
    host: &mut HostApi,
    module: &dyn HostModule,
    main_method: Option<&str>,
) -> Result<(), HostError> {
    match main_method {
        None => {
            module.load(host)?;
            patch(host);
            Ok(())
        }
        Some(entry) => {
            debug!(entry, "deferring patch until entry is defined");
            host.on_first_define(entry, Box::new(patch));
            module.load(host)
        }
    }
}
