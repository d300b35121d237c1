// Default URLs
pub static PRODUCTION_URL: &str = "https://api.geniebiz.lk/public/";
pub static SANDBOX_URL: &str = "https://api.uat.geniebiz.lk/public/";

// Protocol fields injected into every POST body
pub static API_VERSION_FIELD: &str = "apiVersion";
pub static APP_VERSION_FIELD: &str = "appVersion";
pub static SIGN_METHOD_FIELD: &str = "signMethod";

// Only this pagination key is ever forwarded as a query parameter
pub static PAGE_QUERY_KEY: &str = "page";

pub static JSON_CONTENT_TYPE: &str = "application/json";
