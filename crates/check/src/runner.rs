use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::aggregator::Aggregator;
use crate::context::CheckContext;
use crate::gate::WarnOnce;
use crate::identity::{CheckIdentity, Instance};

pub trait Check: Send {
    fn check(&mut self, ctx: &CheckContext<'_>, instance: Instance) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckFailure {
    pub message: String,
    pub traceback: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    Success,
    Failure(CheckFailure),
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn to_wire(&self) -> String {
        match self {
            Self::Success => String::new(),
            Self::Failure(failure) => {
                serde_json::to_string(&[failure]).expect("failure payload serializes")
            }
        }
    }
}

pub struct CheckRunner {
    identity: CheckIdentity,
    routine: Box<dyn Check>,
    aggregator: Arc<dyn Aggregator>,
    increment_deprecation: WarnOnce,
}

impl CheckRunner {
    pub fn new(
        identity: CheckIdentity,
        routine: Box<dyn Check>,
        aggregator: Arc<dyn Aggregator>,
    ) -> Self {
        Self {
            identity,
            routine,
            aggregator,
            increment_deprecation: WarnOnce::new(),
        }
    }

    pub fn identity(&self) -> &CheckIdentity {
        &self.identity
    }

    pub fn run(&mut self) -> RunResult {
        let instance = self.identity.instances()[0].clone();
        let ctx = CheckContext::new(
            &self.identity,
            self.aggregator.as_ref(),
            &self.increment_deprecation,
        );

        let routine = &mut self.routine;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| routine.check(&ctx, instance)));

        match outcome {
            Ok(Ok(())) => RunResult::Success,
            Ok(Err(error)) => RunResult::Failure(CheckFailure {
                message: error.to_string(),
                traceback: format!("{error:?}"),
            }),
            Err(payload) => RunResult::Failure(CheckFailure {
                message: panic_message(payload.as_ref()),
                traceback: Backtrace::force_capture().to_string(),
            }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}
