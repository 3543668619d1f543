use rocket::{
    fairing::{Fairing, Info, Kind},
    http::Header,
    Request, Response,
};

/// A fairing that stamps the permissive cross-origin headers expected by the
/// web client onto every response, matching what the upstream gateway used
/// to add.
pub struct CorsFairing;

#[rocket::async_trait]
impl Fairing for CorsFairing {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _req: &'r Request<'_>, res: &mut Response<'r>) {
        res.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        res.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type,Authorization",
        ));
        res.set_header(Header::new("Access-Control-Allow-Methods", "OPTIONS,POST"));
    }
}

/// Answer CORS preflight requests for any path; the headers themselves are
/// added by [`CorsFairing`].
#[options("/<_..>")]
pub fn preflight() {}
