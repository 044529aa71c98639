//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use tavern_config::{CookieConfig, SameSitePolicy};

fn base_cookie(config: &CookieConfig, value: String) -> Cookie<'static> {
    let same_site = match config.same_site {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
    };

    Cookie::build((config.name.clone(), value))
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site)
        .path("/")
        .build()
}

/// The cookie carrying a newly issued session token.
pub fn session_cookie(config: &CookieConfig, token: String, max_age_secs: i64) -> Cookie<'static> {
    let mut cookie = base_cookie(config, token);
    cookie.set_max_age(Duration::seconds(max_age_secs));
    cookie
}

/// An already-expired cookie with the same name and attributes as the
/// session cookie. Sent on logout whether or not the request had a session.
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(config, String::new());
    cookie.make_removal();
    cookie
}
