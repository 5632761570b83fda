use crate::dto::HealthRes;

/// Health check behind the REST `/health` route.
#[derive(Clone, Copy, Debug)]
pub struct HealthService;

impl HealthService {
    /// Liveness only. Catalog loading happens before a server accepts requests, so a running
    /// process always has a usable catalog.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Lung catalog is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_alive() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert_eq!(res.message, "Lung catalog is alive");
    }
}
