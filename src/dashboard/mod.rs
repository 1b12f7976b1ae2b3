//! 物品面板视图模型
//!
//! 持有物品集合（服务端数据的只读缓存）、表单草稿与分页游标。
//! 每次变更后都整体重新拉取集合，从不在本地修补，`cost_per_day`
//! 等服务端派生字段因此始终以服务端为准。
//!
//! 状态变更被拆分为 `begin_*` / `finish_*` 两步，中间的 await 由调用方负责，
//! 这样 UI 层可以在信号里持有模型，在异步任务完成后再写回结果。
//! `refresh` / `submit` / `delete` 是把两步串起来的便捷版本。
//!
//! 并发策略：重叠的变更不排队，每次变更各自触发一次重新拉取；
//! 只有最后发出的拉取结果会被应用（“最新发出者胜出”），更早的响应被静默丢弃。

mod draft;
mod pagination;


pub use draft::ItemDraft;
pub use pagination::Pagination;

use crate::error::{ClientError, ClientResult};
use crate::items::{ItemForm, ItemsApi};
use crate::request::HttpClient;
use crate::session::AuthToken;
use costwise_shared::{Item, ItemId};
use tracing::debug;

/// 提交流程的状态
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    /// 错误已展示，等待下一次成功操作或取消
    Error(ClientError),
}

/// 一次集合拉取的凭据（单调递增的代数）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket(u64);

/// `begin_submit` 决定要执行的请求
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitPlan {
    Create(ItemForm),
    Update(ItemId, ItemForm),
}

impl SubmitPlan {
    /// 执行该计划
    pub async fn run<C: HttpClient>(&self, api: &ItemsApi<C>, token: &AuthToken) -> ClientResult<()> {
        match self {
            SubmitPlan::Create(form) => api.create(token, form).await.map(|_| ()),
            SubmitPlan::Update(id, form) => api.update(token, *id, form).await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardModel {
    items: Vec<Item>,
    draft: ItemDraft,
    pagination: Pagination,
    phase: Phase,
    loading: bool,
    generation: u64,
    disposed: bool,
}

impl Default for DashboardModel {
    fn default() -> Self {
        Self::new(Pagination::default().page_size())
    }
}

impl DashboardModel {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            draft: ItemDraft::default(),
            pagination: Pagination::new(page_size),
            phase: Phase::Idle,
            loading: false,
            generation: 0,
            disposed: false,
        }
    }

    // --- Accessors ---

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// 当前页的物品
    pub fn visible_items(&self) -> &[Item] {
        self.pagination.slice(&self.items)
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ItemDraft {
        &mut self.draft
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.items.len())
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.phase {
            Phase::Error(e) => Some(e.user_message()),
            _ => None,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // --- Pagination ---

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    pub fn next_page(&mut self) {
        self.pagination.next_page();
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous_page();
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination.has_next(self.items.len())
    }

    // --- Collection fetch ---

    /// 开始一次拉取，之前发出的拉取全部作废
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket(self.generation)
    }

    /// 应用拉取结果；凭据过期或模型已销毁时丢弃并返回 false
    ///
    /// 拉取失败时保留现有集合（首次加载即为空）并展示错误。
    /// 拉取成功只清除拉取类错误；变更失败的错误要在其后的重新拉取之后继续展示。
    pub fn finish_refresh(&mut self, ticket: FetchTicket, result: ClientResult<Vec<Item>>) -> bool {
        if self.disposed || ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "discarding stale item list");
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.pagination.clamp_to(self.items.len());
                if matches!(
                    self.phase,
                    Phase::Error(ClientError::FetchError { .. } | ClientError::NetworkError(_))
                ) {
                    self.phase = Phase::Idle;
                }
            }
            Err(e) => self.phase = Phase::Error(e),
        }
        true
    }

    // --- Submit (create / update) ---

    /// 校验草稿并决定执行创建还是更新
    ///
    /// 校验失败时进入错误状态，草稿保持不变。
    pub fn begin_submit(&mut self) -> ClientResult<SubmitPlan> {
        match self.draft.to_form() {
            Ok(form) => {
                self.phase = Phase::Submitting;
                Ok(match self.draft.editing_id {
                    Some(id) => SubmitPlan::Update(id, form),
                    None => SubmitPlan::Create(form),
                })
            }
            Err(e) => {
                self.phase = Phase::Error(e.clone());
                Err(e)
            }
        }
    }

    /// 记录提交结果，返回是否需要重新拉取集合
    pub fn finish_submit(&mut self, result: ClientResult<()>) -> bool {
        if self.disposed {
            return false;
        }
        match result {
            Ok(()) => {
                self.draft.clear();
                self.phase = Phase::Idle;
                true
            }
            Err(e) => {
                self.phase = Phase::Error(e);
                false
            }
        }
    }

    // --- Edit ---

    /// 进入编辑模式（使用本地缓存的副本），清除已展示的错误
    pub fn edit(&mut self, item: &Item) {
        self.draft = ItemDraft::from_item(item);
        self.phase = Phase::Idle;
    }

    /// 按 ID 在当前集合中查找并编辑，找不到返回 false
    pub fn edit_by_id(&mut self, id: ItemId) -> bool {
        match self.items.iter().find(|item| item.id == id) {
            Some(item) => {
                self.draft = ItemDraft::from_item(item);
                self.phase = Phase::Idle;
                true
            }
            None => false,
        }
    }

    /// 草稿无法提交（例如图片读取失败）时展示错误，草稿保持不变
    pub fn reject_draft(&mut self, message: impl Into<String>) {
        self.phase = Phase::Error(ClientError::InvalidDraft(message.into()));
    }

    /// 放弃草稿并清除错误
    pub fn cancel_edit(&mut self) {
        self.draft.clear();
        self.phase = Phase::Idle;
    }

    // --- Delete ---

    /// 记录删除结果；无论成功与否之后都应重新拉取，返回值表示结果是否被应用
    pub fn finish_delete(&mut self, id: ItemId, result: ClientResult<()>) -> bool {
        if self.disposed {
            return false;
        }
        match result {
            Ok(()) => {
                if self.draft.editing_id == Some(id) {
                    self.draft.clear();
                }
                self.phase = Phase::Idle;
            }
            Err(e) => self.phase = Phase::Error(e),
        }
        true
    }

    /// 视图被替换时调用，之后到达的所有结果都被丢弃
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.loading = false;
    }

    // --- 便捷的异步流程 ---

    /// 拉取完整集合
    pub async fn refresh<C: HttpClient>(&mut self, api: &ItemsApi<C>, token: &AuthToken) -> bool {
        let ticket = self.begin_refresh();
        let result = api.list(token).await;
        self.finish_refresh(ticket, result)
    }

    /// 提交草稿；成功后清空草稿并重新拉取
    pub async fn submit<C: HttpClient>(&mut self, api: &ItemsApi<C>, token: &AuthToken) -> ClientResult<()> {
        let plan = self.begin_submit()?;
        let result = plan.run(api, token).await;
        let outcome = result.clone();
        if self.finish_submit(result) {
            self.refresh(api, token).await;
        }
        outcome
    }

    /// 删除物品，然后无条件重新拉取
    pub async fn delete<C: HttpClient>(
        &mut self,
        api: &ItemsApi<C>,
        token: &AuthToken,
        id: ItemId,
    ) -> ClientResult<()> {
        let result = api.delete(token, id).await;
        let outcome = result.clone();
        if self.finish_delete(id, result) {
            self.refresh(api, token).await;
        }
        outcome
    }
}
