/// Service principal credentials for the client-credentials token flow.
/// No `Debug` derive: the secret must not reach logs.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}
