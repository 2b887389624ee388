//! Recording session — evaluate, then persist.
//!
//! Each session owns an observation log. Apply-before-persist order:
//!   1. evaluate the kernel         — caller errors stop here
//!   2. append the observation      — only if step 1 succeeded
//!
//! Sequence numbers are assigned by the session, never by the caller.

use std::path::{Path, PathBuf};

use bench_kernels::{evaluate, KernelError, KernelId, Reading, Semantics};
use thiserror::Error;
use tracing::debug;

use crate::observation::Observation;
use crate::observation_store::{ObservationStore, StoreError};
use crate::proto_bridge::{observation_to_proto, proto_to_observation, BridgeError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub struct RecordingSession {
    store: ObservationStore,
    semantics: Semantics,
}

impl RecordingSession {
    /// Open (or continue) the log at `path`.
    pub fn open(path: &Path, semantics: Semantics) -> Result<Self, SessionError> {
        let store = ObservationStore::open(path)?;
        debug!(path = %path.display(), last_sequence = store.last_sequence(), "opened session");
        Ok(Self { store, semantics })
    }

    /// Session with its own directory:
    ///   <base_dir>/<session_id>/observations.log
    pub fn in_dir(base_dir: &Path, session_id: &str, semantics: Semantics) -> Result<Self, SessionError> {
        Self::open(&Self::log_path(base_dir, session_id), semantics)
    }

    pub fn log_path(base_dir: &Path, session_id: &str) -> PathBuf {
        base_dir.join(session_id).join("observations.log")
    }

    /// Evaluate a kernel and record the observation.
    ///
    /// Faults are recorded like any other outcome; only caller errors
    /// (arity, input kind) leave the log untouched.
    pub fn record(&mut self, kernel: KernelId, inputs: &[Reading]) -> Result<Observation, SessionError> {
        let outcome = evaluate(kernel, self.semantics, inputs)?;
        let observation = Observation {
            sequence: self.store.last_sequence() + 1,
            kernel,
            semantics: self.semantics,
            inputs: inputs.to_vec(),
            outcome,
        };
        self.store.append(&observation_to_proto(&observation))?;
        Ok(observation)
    }

    /// Append an observation produced elsewhere (e.g. by the harness).
    ///
    /// The caller's sequence number is ignored.
    pub fn append(&mut self, observation: &Observation) -> Result<Observation, SessionError> {
        let observation = Observation {
            sequence: self.store.last_sequence() + 1,
            ..observation.clone()
        };
        self.store.append(&observation_to_proto(&observation))?;
        Ok(observation)
    }

    pub fn observations(&self) -> Result<Vec<Observation>, SessionError> {
        load_observations(&self.store)
    }

    pub fn current_sequence(&self) -> u64 {
        self.store.last_sequence()
    }

    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

pub(crate) fn load_observations(store: &ObservationStore) -> Result<Vec<Observation>, SessionError> {
    store
        .load_all()?
        .iter()
        .map(|p| proto_to_observation(p).map_err(SessionError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_kernels::{Fault, Outcome};

    fn base_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("bench_runtime_session_tests").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_record_assigns_sequence() {
        let mut session = RecordingSession::in_dir(&base_dir("sequence"), "s1", Semantics::Truncating).unwrap();
        let a = session.record(KernelId::Power, &[Reading::Int(3), Reading::Int(9)]).unwrap();
        let b = session.record(KernelId::Power, &[Reading::Int(3), Reading::Int(10)]).unwrap();
        assert_eq!((a.sequence, b.sequence), (1, 2));
        assert_eq!(b.outcome, Outcome::Value(Reading::Int(13)));
        assert_eq!(session.observations().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_caller_error_is_not_persisted() {
        let mut session = RecordingSession::in_dir(&base_dir("rejected"), "s1", Semantics::Truncating).unwrap();
        let err = session.record(KernelId::Power, &[Reading::Int(3)]).unwrap_err();
        assert!(matches!(err, SessionError::Kernel(KernelError::Arity { .. })));
        assert_eq!(session.current_sequence(), 0);
        assert!(session.observations().unwrap().is_empty());
    }

    #[test]
    fn test_fault_is_persisted() {
        let mut session = RecordingSession::in_dir(&base_dir("fault"), "s1", Semantics::Truncating).unwrap();
        let obs = session.record(KernelId::Gammln, &[Reading::Int(-1)]).unwrap();
        assert_eq!(obs.outcome, Outcome::Fault(Fault::DivisionByZero));
        assert_eq!(session.current_sequence(), 1);
    }

    #[test]
    fn test_reopen_continues_sequence() {
        let base = base_dir("reopen");
        {
            let mut session = RecordingSession::in_dir(&base, "s1", Semantics::Float).unwrap();
            session.record(KernelId::Erfcc, &[Reading::Real(0.5)]).unwrap();
        }
        let mut session = RecordingSession::in_dir(&base, "s1", Semantics::Float).unwrap();
        assert_eq!(session.current_sequence(), 1);
        let obs = session.record(KernelId::Erfcc, &[Reading::Real(1.5)]).unwrap();
        assert_eq!(obs.sequence, 2);
    }

    #[test]
    fn test_append_renumbers() {
        let mut session = RecordingSession::in_dir(&base_dir("append"), "s1", Semantics::Truncating).unwrap();
        let foreign = Observation {
            sequence: 99,
            kernel: KernelId::RanzeroNeq,
            semantics: Semantics::Truncating,
            inputs: vec![Reading::Int(1)],
            outcome: Outcome::Value(Reading::Int(16807)),
        };
        let stored = session.append(&foreign).unwrap();
        assert_eq!(stored.sequence, 1);
        assert_eq!(stored.inputs, foreign.inputs);
    }
}
