//! Compiler Options Value Object
//!
//! Two layers: strictness flags that are always forced on, and a small set
//! of path/target/library options the caller may set. The forced layer is
//! written last so no caller-provided value can weaken it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Flags written into every generated project, in this order
pub const FORCED_FLAGS: &[(&str, bool)] = &[
    ("strict", true),
    ("noImplicitAny", true),
    ("noImplicitReturns", true),
    ("strictNullChecks", true),
    ("noFallthroughCasesInSwitch", true),
    ("noPropertyAccessFromIndexSignature", true),
    ("forceConsistentCasingInFileNames", true),
    ("noImplicitOverride", true),
    ("noEmitOnError", true),
    ("noEmit", true),
    ("allowJs", false),
];

/// Caller-settable options (tsconfig spelling)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermittedCompilerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_json_module: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_lib_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_module_interop: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl PermittedCompilerOptions {
    /// Keys accepted under `[type_checker.compiler_options]`
    pub const KEYS: &'static [&'static str] = &[
        "jsx",
        "target",
        "module",
        "lib",
        "moduleResolution",
        "paths",
        "resolveJsonModule",
        "skipLibCheck",
        "esModuleInterop",
        "baseUrl",
    ];
}

/// Fully composed options: defaults, then caller overrides, then forced flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    permitted: PermittedCompilerOptions,
}

impl CompilerOptions {
    pub fn new(permitted: PermittedCompilerOptions) -> Self {
        Self { permitted }
    }

    pub fn permitted(&self) -> &PermittedCompilerOptions {
        &self.permitted
    }

    /// Render the `compilerOptions` object of a tsconfig
    pub fn to_json(&self) -> Value {
        let mut options = Map::new();
        options.insert("esModuleInterop".into(), json!(true));
        options.insert("skipLibCheck".into(), json!(true));
        options.insert("jsx".into(), json!("react-jsx"));
        options.insert("target".into(), json!("ES2015"));
        options.insert("module".into(), json!("CommonJS"));

        if let Ok(Value::Object(overrides)) = serde_json::to_value(&self.permitted) {
            for (key, value) in overrides {
                options.insert(key, value);
            }
        }

        for (key, value) in FORCED_FLAGS {
            options.insert((*key).to_string(), json!(value));
        }

        Value::Object(options)
    }

    /// Whether `key` names a flag that can never be overridden
    pub fn is_forced(key: &str) -> bool {
        FORCED_FLAGS.iter().any(|(name, _)| *name == key)
    }
}
