/// Builds the full service over the given database, with `glimmora.com` as
/// the demo domain.
#[macro_export]
macro_rules! init_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(
                    Box::new($db) as Box<dyn reach_server::database::Database>
                ))
                .app_data(actix_web::web::Data::new(
                    reach_server::scope::ScopePolicy::new(Some("glimmora.com".to_string())),
                ))
                .app_data(actix_web::web::Data::new(
                    reach_server::placement::PlatformStatus::snapshot(chrono::Utc::now()),
                ))
                .configure(reach_server::configure),
        )
        .await
    };
}
