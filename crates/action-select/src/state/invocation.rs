//! Invocation flow: choose an action, then answer zero or more argument
//! prompts until the service reports the invocation complete.

use crate::model::Entry;
use crate::protocol::{ArgumentRequest, Arguments, RequestId};

/// The action being invoked and the arguments collected for it so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub key: String,
    pub args: Arguments,
}

/// State of the invocation flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowState {
    /// No panel, or the panel was closed.
    #[default]
    Idle,
    /// The list shows top-level actions.
    ChoosingAction,
    /// An invocation request is awaiting its response.
    Dispatched {
        request: RequestId,
        context: InvocationContext,
    },
    /// The list shows choices for `param`.
    AwaitingArgument {
        param: String,
        context: InvocationContext,
    },
}

/// Result of feeding a service response into the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// The response did not belong to the dispatched request.
    Ignored,
    /// No further argument is needed.
    Complete(InvocationContext),
    /// The service asked for another argument.
    Prompt(ArgumentRequest),
}

impl FlowState {
    /// Context that submitting `entry` would send, or `None` when nothing can
    /// be submitted in this state.
    ///
    /// A top-level action starts from empty arguments; an argument choice
    /// records its payload under the prompted parameter and keeps the action.
    pub fn prepare(&self, entry: &Entry) -> Option<InvocationContext> {
        match self {
            Self::ChoosingAction => Some(InvocationContext {
                key: entry.key.clone(),
                args: Arguments::new(),
            }),
            Self::AwaitingArgument { param, context } => {
                let mut context = context.clone();
                let value = entry.payload.clone().unwrap_or_else(|| entry.key.clone());
                context.args.insert(param.clone(), value);
                Some(context)
            }
            Self::Idle | Self::Dispatched { .. } => None,
        }
    }

    pub fn dispatch(&mut self, request: RequestId, context: InvocationContext) {
        log::debug!("Invocation {} dispatched for '{}'", request, context.key);
        *self = Self::Dispatched { request, context };
    }

    /// Apply the first argument request of the response to `request`.
    pub fn respond(&mut self, request: RequestId, argument: Option<ArgumentRequest>) -> FlowStep {
        let context = match self {
            Self::Dispatched {
                request: dispatched,
                context,
            } if *dispatched == request => std::mem::take(context),
            _ => return FlowStep::Ignored,
        };

        match argument {
            None => {
                *self = Self::Idle;
                FlowStep::Complete(context)
            }
            Some(argument) => {
                *self = Self::AwaitingArgument {
                    param: argument.param.clone(),
                    context,
                };
                FlowStep::Prompt(argument)
            }
        }
    }

    /// Parameter currently being collected.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::AwaitingArgument { param, .. } => Some(param),
            _ => None,
        }
    }

    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}
