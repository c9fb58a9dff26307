//! OpenAPI documentation configuration.

use tally_types::api::{ErrorResponse, SessionResponse, SumRequest, SumResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::sum::sum_array,
        crate::api::sum::async_sum,
        crate::api::sum::get_sum,
    ),
    components(
        schemas(
            SumRequest,
            SumResponse,
            SessionResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "sum", description = "Digit-string summation endpoints")
    ),
    info(
        title = "Case 7 - Sum service",
        version = "0.1.0",
        description = "Sums the digit strings of a list, immediately or for later retrieval by session ID",
        license(
            name = "MIT OR Apache-2.0"
        )
    )
)]
pub struct ApiDoc;
