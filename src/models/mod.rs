pub mod auth;
pub mod operation;
pub mod transition;
pub mod workcenter;

pub use auth::{LoginData, LoginRequest};
pub use operation::{
    derive_status, parse_operation_rows, transform_operations, DisplayStatus, OperationRow,
    OperationsCache, RawOperation,
};
pub use transition::{
    enabled_actions, status_code_from_data, EnabledActions, TransitionAction, TransitionOutcome,
    DEFAULT_TRANSITION_CODE,
};
pub use workcenter::{find_workcenter, transform_workcenters, RawStand, Stand, WorkCenter};

pub(crate) use operation::string_or_number;
