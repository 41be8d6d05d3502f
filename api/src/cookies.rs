//! Token delivery as HTTP cookies

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpResponseBuilder;

use authsvc_core::domain::entities::token::TokenPair;
use authsvc_shared::CookieConfig;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn same_site(config: &CookieConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

fn build(
    config: &CookieConfig,
    name: &'static str,
    value: String,
    max_age_secs: i64,
) -> Cookie<'static> {
    Cookie::build(name, value)
        .domain(config.domain.clone())
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(config))
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Attach both token cookies to a response
pub fn set_token_cookies(
    builder: &mut HttpResponseBuilder,
    config: &CookieConfig,
    tokens: &TokenPair,
) {
    builder.cookie(build(
        config,
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        tokens.access_expires_in,
    ));
    builder.cookie(build(
        config,
        REFRESH_TOKEN_COOKIE,
        tokens.refresh_token.clone(),
        tokens.refresh_expires_in,
    ));
}

/// Expire both token cookies
pub fn clear_token_cookies(builder: &mut HttpResponseBuilder, config: &CookieConfig) {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = build(config, name, String::new(), 0);
        cookie.make_removal();
        builder.cookie(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpResponse;

    fn tokens() -> TokenPair {
        TokenPair {
            access_token: "access.jwt.value".to_string(),
            refresh_token: "refresh.jwt.value".to_string(),
            access_expires_in: 3600,
            refresh_expires_in: 31_536_000,
        }
    }

    #[test]
    fn test_token_cookie_attributes() {
        let mut builder = HttpResponse::Ok();
        set_token_cookies(&mut builder, &CookieConfig::default(), &tokens());
        let response = builder.finish();

        let cookies: Vec<_> = response.cookies().collect();
        let access = cookies
            .iter()
            .find(|c| c.name() == ACCESS_TOKEN_COOKIE)
            .unwrap();
        let refresh = cookies
            .iter()
            .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
            .unwrap();

        assert_eq!(access.value(), "access.jwt.value");
        assert_eq!(access.max_age(), Some(Duration::seconds(3600)));
        assert_eq!(refresh.max_age(), Some(Duration::seconds(31_536_000)));
        for cookie in [access, refresh] {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Strict));
            assert_eq!(cookie.domain(), Some("localhost"));
        }
    }

    #[test]
    fn test_clear_cookies() {
        let mut builder = HttpResponse::Ok();
        clear_token_cookies(&mut builder, &CookieConfig::default());
        let response = builder.finish();

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.value().is_empty()));
        assert!(cookies
            .iter()
            .all(|c| c.max_age() == Some(Duration::ZERO)));
    }
}
