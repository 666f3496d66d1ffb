// Authentication endpoint handlers, one file per route.
//
// Shared shape: validate -> delegate to the user service -> issue token ->
// shape the response. Validation failures and the duplicate-email conflict
// are answered inline; everything else propagates as ApiError through `?`.

pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use sign_in::sign_in;
pub use sign_out::sign_out;
pub use sign_up::sign_up;
