use rocket::Route;

mod auth;
mod ingest;
mod public;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(ingest::routes());
    routes.extend(public::routes());
    routes.extend(routes![crate::cors::preflight]);
    routes
}
