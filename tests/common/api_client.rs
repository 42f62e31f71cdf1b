use reqwest::{Client, Response};
use serde::Serialize;

pub struct ApiClient {
    pub url: String,
}

impl ApiClient {
    pub fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    pub async fn get(&self, client: &Client, endpoint: &str) -> Response {
        client
            .get(self.path(endpoint))
            .send()
            .await
            .expect("Failed to send http request")
    }

    pub async fn post<T: Serialize>(&self, client: &Client, endpoint: &str, body: &T) -> Response {
        client
            .post(self.path(endpoint))
            .json(body)
            .send()
            .await
            .expect("Failed to send http request")
    }

    pub async fn post_no_body(&self, client: &Client, endpoint: &str) -> Response {
        client
            .post(self.path(endpoint))
            .send()
            .await
            .expect("Failed to send http request")
    }
}
