//! splitcut Common Library
//!
//! CLIとWeb(WASM)で共有されるワークフロー制御・型・ユーティリティ

pub mod backend;
pub mod controller;
pub mod error;
pub mod request;
pub mod session;
pub mod time;
pub mod types;
pub mod view;

pub use backend::{Backend, TransportResult};
pub use controller::{WorkflowController, FILE_LOADED_MESSAGE};
pub use error::{Action, Error, Result, TransportError, UserInputError};
pub use request::Ticket;
pub use session::Session;
pub use time::{format_time, format_times, round_millis, split_position};
pub use types::{
    ApiResponse, ConcatRequest, ConcatResponse, SplitRequest, SplitResponse, ThumbnailsRequest,
    ThumbnailsResponse, UploadResponse, CONCAT_ENDPOINT, DEFAULT_THUMBNAIL_COUNT, SPLIT_ENDPOINT,
    THUMBNAILS_ENDPOINT, UPLOAD_ENDPOINT, UPLOAD_FIELD,
};
pub use view::{LinkKind, SegmentLink, SegmentList, SplitMarker, SplitMarkerList, StatusLog};
