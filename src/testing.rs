//! 测试工具: 内存版库存服务
//!
//! 按远端服务的接口约定处理认证与物品请求，`cost_per_day` 在这里（服务端）
//! 计算，客户端代码只负责展示。

use crate::request::{FormPart, HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody, TransportError};
use costwise_shared::money::Decimal;
use costwise_shared::{Item, ItemId, LoginRequest, Money, PurchaseDate, RegisterRequest};
use serde_json::json;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

pub const BASE_URL: &str = "http://inventory.test/api";

#[derive(Default)]
struct FakeState {
    users: HashMap<String, String>,
    tokens: HashSet<String>,
    items: BTreeMap<u64, Item>,
    next_id: u64,
    /// (方法, 路径) -> 下一次请求强制返回的状态码
    failures: HashMap<(HttpMethod, String), u16>,
}

pub struct FakeInventoryService {
    state: RefCell<FakeState>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl FakeInventoryService {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(FakeState {
                next_id: 1,
                ..Default::default()
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// 预置一个用户并返回其有效 token
    pub fn with_user(self, username: &str, password: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.users.insert(username.to_string(), password.to_string());
            state.tokens.insert(token_for(username));
        }
        self
    }

    pub fn seed_item(&self, name: &str, price: &str, purchase_date: &str) -> ItemId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let price: Money = price.parse().expect("seed price");
        let purchase_date: PurchaseDate = purchase_date.parse().expect("seed date");
        state.items.insert(
            id,
            Item {
                id: ItemId::new(id),
                name: name.to_string(),
                price,
                purchase_date,
                image: None,
                cost_per_day: Some(cost_per_day(price, purchase_date)),
            },
        );
        ItemId::new(id)
    }

    pub fn fail_next(&self, method: HttpMethod, path: &str, status: u16) {
        self.state
            .borrow_mut()
            .failures
            .insert((method, path.to_string()), status);
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.state.borrow().items.values().map(|i| i.id).collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn handle(&self, req: &HttpRequest) -> HttpResponse {
        let path = req.url.strip_prefix(BASE_URL).unwrap_or(&req.url).to_string();

        if let Some(status) = self
            .state
            .borrow_mut()
            .failures
            .remove(&(req.method, path.clone()))
        {
            return HttpResponse::new(status, json!({"detail": "forced failure"}).to_string());
        }

        match (req.method, path.as_str()) {
            (HttpMethod::Post, "/auth/token/login/") => self.login(req),
            (HttpMethod::Post, "/auth/users/") => self.register(req),
            _ if path.starts_with("/items/") => {
                if !self.authorized(req) {
                    return HttpResponse::new(401, json!({"detail": "Invalid token."}).to_string());
                }
                let id = path
                    .trim_start_matches("/items/")
                    .trim_end_matches('/')
                    .parse::<u64>()
                    .ok();
                match (req.method, id) {
                    (HttpMethod::Get, None) => self.list(),
                    (HttpMethod::Post, None) => self.create(req),
                    (HttpMethod::Put, Some(id)) => self.update(id, req),
                    (HttpMethod::Delete, Some(id)) => self.delete(id),
                    _ => HttpResponse::new(405, ""),
                }
            }
            _ => HttpResponse::new(404, "Not Found"),
        }
    }

    fn authorized(&self, req: &HttpRequest) -> bool {
        req.header("Authorization")
            .and_then(|h| h.strip_prefix("Token "))
            .is_some_and(|t| self.state.borrow().tokens.contains(t))
    }

    fn login(&self, req: &HttpRequest) -> HttpResponse {
        let Some(body) = json_body::<LoginRequest>(req) else {
            return HttpResponse::new(400, "");
        };
        let state = self.state.borrow();
        match state.users.get(&body.username) {
            Some(password) if *password == body.password => HttpResponse::new(
                200,
                json!({"auth_token": token_for(&body.username)}).to_string(),
            ),
            _ => HttpResponse::new(
                400,
                json!({"non_field_errors": ["Unable to log in with provided credentials."]}).to_string(),
            ),
        }
    }

    fn register(&self, req: &HttpRequest) -> HttpResponse {
        let Some(body) = json_body::<RegisterRequest>(req) else {
            return HttpResponse::new(400, "");
        };
        let mut state = self.state.borrow_mut();
        if state.users.contains_key(&body.username) {
            return HttpResponse::new(
                400,
                json!({"username": ["A user with that username already exists."]}).to_string(),
            );
        }
        if body.password != body.re_password {
            return HttpResponse::new(
                400,
                json!({"non_field_errors": ["The two password fields didn't match."]}).to_string(),
            );
        }
        state.users.insert(body.username.clone(), body.password);
        state.tokens.insert(token_for(&body.username));
        let id = state.users.len();
        HttpResponse::new(
            201,
            json!({"email": "", "username": body.username, "id": id}).to_string(),
        )
    }

    fn list(&self) -> HttpResponse {
        let items: Vec<Item> = self.state.borrow().items.values().cloned().collect();
        HttpResponse::new(200, serde_json::to_string(&items).unwrap_or_default())
    }

    fn create(&self, req: &HttpRequest) -> HttpResponse {
        let Some(fields) = multipart_fields(req) else {
            return HttpResponse::new(400, "");
        };
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let item = Item {
            id: ItemId::new(id),
            name: fields.name,
            price: fields.price,
            purchase_date: fields.purchase_date,
            image: fields.image,
            cost_per_day: Some(cost_per_day(fields.price, fields.purchase_date)),
        };
        state.items.insert(id, item.clone());
        HttpResponse::new(201, serde_json::to_string(&item).unwrap_or_default())
    }

    fn update(&self, id: u64, req: &HttpRequest) -> HttpResponse {
        let Some(fields) = multipart_fields(req) else {
            return HttpResponse::new(400, "");
        };
        let mut state = self.state.borrow_mut();
        let Some(item) = state.items.get_mut(&id) else {
            return HttpResponse::new(404, json!({"detail": "Not found."}).to_string());
        };
        item.name = fields.name;
        item.price = fields.price;
        item.purchase_date = fields.purchase_date;
        if fields.image.is_some() {
            item.image = fields.image;
        }
        item.cost_per_day = Some(cost_per_day(item.price, item.purchase_date));
        HttpResponse::new(200, serde_json::to_string(item).unwrap_or_default())
    }

    fn delete(&self, id: u64) -> HttpResponse {
        match self.state.borrow_mut().items.remove(&id) {
            Some(_) => HttpResponse::new(204, ""),
            None => HttpResponse::new(404, json!({"detail": "Not found."}).to_string()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FakeInventoryService {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let resp = self.handle(&req);
        self.requests.borrow_mut().push(req);
        Ok(resp)
    }
}

/// 在测试输出中显示客户端日志（重复调用无副作用）
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn token_for(username: &str) -> String {
    format!("token-{}", username)
}

/// 服务端派生值：价格 / 持有天数（以固定的“今天”计算）
fn cost_per_day(price: Money, purchase_date: PurchaseDate) -> Money {
    let today = PurchaseDate::from_ymd(2024, 6, 30).expect("valid date");
    let days = (today.as_naive() - purchase_date.as_naive()).num_days().max(1);
    Money::new((price.amount() / Decimal::from(days)).round_dp(2))
}

fn json_body<T: serde::de::DeserializeOwned>(req: &HttpRequest) -> Option<T> {
    match &req.body {
        RequestBody::Json(body) => serde_json::from_str(body).ok(),
        _ => None,
    }
}

struct MultipartItem {
    name: String,
    price: Money,
    purchase_date: PurchaseDate,
    image: Option<String>,
}

fn multipart_fields(req: &HttpRequest) -> Option<MultipartItem> {
    let RequestBody::Multipart(parts) = &req.body else {
        return None;
    };
    let text = |field: &str| {
        parts.iter().find_map(|p| match p {
            FormPart::Text { name, value } if name == field => Some(value.clone()),
            _ => None,
        })
    };
    let image = parts.iter().find_map(|p| match p {
        FormPart::File { name, file_name, .. } if name == "image" => {
            Some(format!("http://media.test/{}", file_name))
        }
        _ => None,
    });
    Some(MultipartItem {
        name: text("name")?,
        price: text("price")?.parse().ok()?,
        purchase_date: text("purchase_date")?.parse().ok()?,
        image,
    })
}
