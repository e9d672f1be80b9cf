//! Running processes by name

use drowse_probe_api::{ActivityProbe, ProbeOptions, ProbeResult, SetupError, SetupResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

const PROC_ROOT: &str = "/proc";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProcessesOptions {
    processes: Vec<String>,
}

/// Active while any process with one of the given names is running.
///
/// Names are compared against `/proc/<pid>/comm`, which the kernel
/// truncates to 15 bytes.
#[derive(Debug)]
pub struct Processes {
    name: String,
    processes: HashSet<String>,
    proc_root: PathBuf,
}

impl Processes {
    pub fn new(name: impl Into<String>, processes: impl IntoIterator<Item = String>) -> Self {
        Self::with_proc_root(name, processes, PROC_ROOT)
    }

    pub fn with_proc_root(
        name: impl Into<String>,
        processes: impl IntoIterator<Item = String>,
        proc_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            processes: processes.into_iter().collect(),
            proc_root: proc_root.into(),
        }
    }

    pub fn create(name: &str, options: &ProbeOptions) -> SetupResult<Self> {
        let opts: ProcessesOptions = options.parse(name)?;
        if opts.processes.is_empty() {
            return Err(SetupError::invalid_options(name, "processes cannot be empty"));
        }
        Ok(Self::new(name, opts.processes))
    }
}

impl ActivityProbe for Processes {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> ProbeResult<Option<String>> {
        for entry in std::fs::read_dir(&self.proc_root)? {
            let Ok(entry) = entry else { continue };
            let is_pid = entry
                .file_name()
                .to_str()
                .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
            if !is_pid {
                continue;
            }

            // processes may exit between listing and reading
            let Ok(comm) = std::fs::read_to_string(entry.path().join("comm")) else {
                continue;
            };
            let comm = comm.trim_end_matches('\n');
            if self.processes.contains(comm) {
                return Ok(Some(format!("Process {} is running", comm)));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_proc(entries: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (pid, comm) in entries {
            let pid_dir = dir.path().join(pid);
            std::fs::create_dir(&pid_dir).unwrap();
            std::fs::write(pid_dir.join("comm"), format!("{}\n", comm)).unwrap();
        }
        dir
    }

    #[test]
    fn finds_matching_process() {
        let root = fake_proc(&[("1", "systemd"), ("42", "kodi.bin")]);
        let probe = Processes::with_proc_root("p", vec!["kodi.bin".to_string()], root.path());
        assert_eq!(probe.check().unwrap().as_deref(), Some("Process kodi.bin is running"));
    }

    #[test]
    fn ignores_non_pid_entries() {
        let root = fake_proc(&[("1", "systemd"), ("self", "kodi.bin")]);
        let probe = Processes::with_proc_root("p", vec!["kodi.bin".to_string()], root.path());
        assert_eq!(probe.check().unwrap(), None);
    }

    #[test]
    fn missing_root_is_error() {
        let probe = Processes::with_proc_root("p", vec!["x".to_string()], "/nonexistent/proc");
        assert!(probe.check().is_err());
    }

    #[test]
    fn empty_list_rejected() {
        let options = ProbeOptions::new(toml::from_str("processes = []").unwrap());
        assert!(Processes::create("p", &options).is_err());
    }
}
