//! Legacy JavaScript module (JSM) support for the jsmz host.
//!
//! Legacy modules publish their surface with `this.EXPORTED_SYMBOLS = [...]`
//! and declare deferred bindings through `XPCOMUtils.defineLazy*Getter`
//! calls. [`patch`] wraps the host entry points so that, before binding, such
//! files are rewritten into shapes the binder already understands:
//!
//! - the exported name list becomes a `module.exports`-style object literal,
//! - each lazy binding becomes a plain `var` declaration,
//! - `.jsm` files are classified as JavaScript,
//! - imports resolve by file existence alone.

pub mod matchers;
pub use matchers::{
    EXPORTED_SYMBOLS, LAZY_BINDING_METHODS, XPCOM_UTILS, is_export_list_assignment,
    is_lazy_binding_call,
};

pub mod synthesize;
pub use synthesize::{synthesize_export_object, synthesize_lazy_declaration};

pub mod classify;
pub use classify::{JSM_EXTENSION, is_jsm_file};

pub mod resolver;
pub use resolver::{install_resolver, resolve_module_name, resolve_module_names};

pub mod interceptor;
pub use interceptor::{LIB_DOM, RewriteSummary, rewrite_legacy_module};

pub mod install;
pub use install::{load, patch};
