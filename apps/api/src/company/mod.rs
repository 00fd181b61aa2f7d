// Company profiles. Only company_name feeds the assessment pipeline (as
// rendered company context); the remaining fields are profile data.

pub mod handlers;
