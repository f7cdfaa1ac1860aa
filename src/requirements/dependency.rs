//! Python library dependencies and the self-installing dependency gate.

use super::host::{ModuleOracle, PackageInstaller};
use crate::error::Result;
use crate::ui::UserInterface;
use serde::{Deserialize, Serialize};

/// A library the entry point needs.
///
/// `module` is what gets imported; `package` is what gets installed. They
/// are the same for most libraries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DependencySpec", into = "DependencySpec")]
pub struct Dependency {
    pub module: String,
    pub package: String,
}

impl Dependency {
    /// A dependency whose import name is also its package name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            package: name.clone(),
            module: name,
        }
    }

    /// A dependency imported under a different name than it installs as.
    pub fn aliased(module: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            package: package.into(),
        }
    }
}

/// Config form: a bare name or a `{ module, package }` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DependencySpec {
    Name(String),
    Aliased { module: String, package: String },
}

impl From<DependencySpec> for Dependency {
    fn from(spec: DependencySpec) -> Self {
        match spec {
            DependencySpec::Name(name) => Dependency::new(name),
            DependencySpec::Aliased { module, package } => Dependency::aliased(module, package),
        }
    }
}

impl From<Dependency> for DependencySpec {
    fn from(dep: Dependency) -> Self {
        if dep.module == dep.package {
            DependencySpec::Name(dep.module)
        } else {
            DependencySpec::Aliased {
                module: dep.module,
                package: dep.package,
            }
        }
    }
}

/// Libraries required by the `b` entry point, in install order.
pub fn default_dependencies() -> Vec<Dependency> {
    vec![
        Dependency::new("click"),
        Dependency::new("click_default_group"),
        Dependency::new("psutil"),
        Dependency::aliased("dotenv", "python-dotenv"),
        Dependency::new("requests"),
        Dependency::new("watchfiles"),
    ]
}

/// What the dependency gate did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsureReport {
    /// Packages installed during this run, in order.
    pub installed: Vec<String>,
}

impl EnsureReport {
    pub fn nothing_installed(&self) -> bool {
        self.installed.is_empty()
    }
}

/// Dependencies whose module cannot currently be imported.
pub fn missing_dependencies<'a>(
    deps: &'a [Dependency],
    oracle: &dyn ModuleOracle,
) -> Vec<&'a Dependency> {
    deps.iter()
        .filter(|dep| !oracle.is_importable(&dep.module))
        .collect()
}

/// Make every dependency importable, installing the ones that are not.
///
/// Each missing dependency gets one notice and one installer call. The
/// first installer failure is returned as-is; later dependencies are not
/// attempted.
pub fn ensure_dependencies(
    deps: &[Dependency],
    oracle: &dyn ModuleOracle,
    installer: &dyn PackageInstaller,
    ui: &mut dyn UserInterface,
) -> Result<EnsureReport> {
    let mut report = EnsureReport::default();

    for dep in deps {
        if oracle.is_importable(&dep.module) {
            tracing::debug!("Module '{}' is importable", dep.module);
            continue;
        }

        ui.message(&format!(
            "{} is not installed. Installing {}...",
            dep.module, dep.package
        ));
        installer.install(&dep.package)?;
        report.installed.push(dep.package.clone());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BstrapError;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::collections::HashSet;

    struct FakeModules(HashSet<&'static str>);

    impl ModuleOracle for FakeModules {
        fn is_importable(&self, module: &str) -> bool {
            self.0.contains(module)
        }
    }

    #[derive(Default)]
    struct RecordingInstaller {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl PackageInstaller for RecordingInstaller {
        fn install(&self, package: &str) -> Result<()> {
            self.calls.borrow_mut().push(package.to_string());
            if self.fail_on == Some(package) {
                return Err(BstrapError::InstallFailed {
                    package: package.to_string(),
                    code: Some(1),
                });
            }
            Ok(())
        }
    }

    fn all_modules() -> FakeModules {
        FakeModules(HashSet::from([
            "click",
            "click_default_group",
            "psutil",
            "dotenv",
            "requests",
            "watchfiles",
        ]))
    }

    #[test]
    fn default_list_matches_entry_point_needs() {
        let deps = default_dependencies();
        let modules: Vec<_> = deps.iter().map(|d| d.module.as_str()).collect();
        assert_eq!(
            modules,
            [
                "click",
                "click_default_group",
                "psutil",
                "dotenv",
                "requests",
                "watchfiles"
            ]
        );
        assert_eq!(deps[3].package, "python-dotenv");
    }

    #[test]
    fn importable_dependencies_install_nothing() {
        let installer = RecordingInstaller::default();
        let mut ui = MockUI::new();

        let report =
            ensure_dependencies(&default_dependencies(), &all_modules(), &installer, &mut ui)
                .unwrap();

        assert!(report.nothing_installed());
        assert!(installer.calls.borrow().is_empty());
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn missing_dependency_installs_package_name_once() {
        let mut modules = all_modules();
        modules.0.remove("dotenv");
        let installer = RecordingInstaller::default();
        let mut ui = MockUI::new();

        let report =
            ensure_dependencies(&default_dependencies(), &modules, &installer, &mut ui).unwrap();

        assert_eq!(*installer.calls.borrow(), vec!["python-dotenv".to_string()]);
        assert_eq!(report.installed, vec!["python-dotenv".to_string()]);
        assert_eq!(
            ui.messages(),
            ["dotenv is not installed. Installing python-dotenv...".to_string()]
        );
    }

    #[test]
    fn missing_dependencies_install_in_list_order() {
        let modules = FakeModules(HashSet::from(["click"]));
        let installer = RecordingInstaller::default();
        let mut ui = MockUI::new();

        ensure_dependencies(&default_dependencies(), &modules, &installer, &mut ui).unwrap();

        assert_eq!(
            *installer.calls.borrow(),
            vec![
                "click_default_group",
                "psutil",
                "python-dotenv",
                "requests",
                "watchfiles"
            ]
        );
    }

    #[test]
    fn installer_failure_stops_the_gate() {
        let modules = FakeModules(HashSet::new());
        let installer = RecordingInstaller {
            fail_on: Some("psutil"),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let err = ensure_dependencies(&default_dependencies(), &modules, &installer, &mut ui)
            .unwrap_err();

        assert!(matches!(err, BstrapError::InstallFailed { ref package, .. } if package == "psutil"));
        assert_eq!(
            *installer.calls.borrow(),
            vec!["click", "click_default_group", "psutil"]
        );
    }

    #[test]
    fn missing_dependencies_reports_without_installing() {
        let modules = FakeModules(HashSet::from(["click", "psutil"]));
        let deps = default_dependencies();

        let missing = missing_dependencies(&deps, &modules);

        let names: Vec<_> = missing.iter().map(|d| d.module.as_str()).collect();
        assert_eq!(
            names,
            ["click_default_group", "dotenv", "requests", "watchfiles"]
        );
    }

    #[test]
    fn deserializes_bare_and_aliased_forms() {
        let yaml = "- click\n- { module: yaml, package: PyYAML }\n";
        let deps: Vec<Dependency> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(deps[0], Dependency::new("click"));
        assert_eq!(deps[1], Dependency::aliased("yaml", "PyYAML"));
    }

    #[test]
    fn serializes_back_to_compact_form() {
        let yaml = serde_yaml::to_string(&vec![Dependency::new("psutil")]).unwrap();
        assert!(yaml.contains("- psutil"));
    }
}
