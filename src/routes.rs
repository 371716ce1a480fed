use crate::{
    api::{attendance, directory, maps, status},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_files::Files;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // Core routes: open by design, the dashboard and mobile client hit
    // these without credentials
    cfg.route("/", web::get().to(status::index));
    cfg.service(
        web::resource("/attendance")
            .route(web::post().to(attendance::record_attendance))
            .route(web::get().to(attendance::attendance_list)),
    );
    cfg.route("/employees", web::get().to(directory::list_employees));
    cfg.route("/offices", web::get().to(directory::list_offices));

    // Maps key only goes out to a verified session
    cfg.service(
        web::resource("/google")
            .wrap(from_fn(auth_middleware))
            .route(web::get().to(maps::maps_key)),
    );

    // OTP login, rate limited per client IP
    cfg.service(
        web::scope(&format!("{}/auth", config.api_prefix))
            .service(
                web::resource("/request-otp")
                    .wrap(build_limiter(config.rate_otp_request_per_min))
                    .route(web::post().to(handlers::request_otp)),
            )
            .service(
                web::resource("/verify-otp")
                    .wrap(build_limiter(config.rate_otp_verify_per_min))
                    .route(web::post().to(handlers::verify_otp)),
            ),
    );

    // Stored selfies are publicly fetchable
    cfg.service(Files::new("/uploads", config.upload_dir.clone()));
}
