use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};

use crate::error::Error;

pub const CALLER_HEADER: &str = "x-user-email";

/// Visibility rules shared by every request.
#[derive(Clone, Debug, Default)]
pub struct ScopePolicy {
    /// Callers with an address in this domain see every row owned by the domain.
    pub demo_domain: Option<String>,
}

impl ScopePolicy {
    pub fn new(demo_domain: Option<String>) -> ScopePolicy {
        let demo_domain = demo_domain
            .map(|domain| domain.trim().trim_start_matches('@').to_ascii_lowercase())
            .filter(|domain| !domain.is_empty());

        ScopePolicy { demo_domain }
    }

    fn in_demo_domain(&self, email: &str) -> bool {
        match &self.demo_domain {
            Some(domain) => email
                .to_ascii_lowercase()
                .strip_suffix(domain.as_str())
                .map_or(false, |local| local.ends_with('@')),
            None => false,
        }
    }
}

/// A record that belongs to a single caller identity.
pub trait Owned {
    fn owner(&self) -> &str;
}

/// The identity a request is made on behalf of, paired with the visibility rules.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    caller: Option<String>,
    policy: ScopePolicy,
}

impl Scope {
    pub fn new(caller: Option<String>, policy: ScopePolicy) -> Scope {
        let caller = caller
            .map(|caller| caller.trim().to_string())
            .filter(|caller| !caller.is_empty());

        Scope { caller, policy }
    }

    pub fn anonymous() -> Scope {
        Scope::default()
    }

    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    /// The identity recorded as owner on records created in this scope.
    pub fn owner(&self) -> String {
        self.caller.clone().unwrap_or_default()
    }

    pub fn can_see(&self, owner: &str) -> bool {
        let caller = match &self.caller {
            Some(caller) => caller,
            None => return true,
        };

        if owner == caller {
            return true;
        }

        self.policy.in_demo_domain(caller) && self.policy.in_demo_domain(owner)
    }

    pub fn filter<T: Owned>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter().filter(|row| self.can_see(row.owner())).collect()
    }
}

impl FromRequest for Scope {
    type Error = Error;
    type Future = Ready<Result<Scope, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let caller = req
            .headers()
            .get(CALLER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let policy = req
            .app_data::<Data<ScopePolicy>>()
            .map(|policy| policy.get_ref().clone())
            .unwrap_or_default();

        ready(Ok(Scope::new(caller, policy)))
    }
}
