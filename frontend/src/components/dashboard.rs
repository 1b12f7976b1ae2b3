use crate::api::use_services;
use crate::auth::{logout, use_auth};
use crate::components::item_editor::ItemEditor;
use crate::web::FetchHttpClient;
use costwise::{AuthToken, DashboardModel, ItemsApi};
use costwise_shared::{Item, ItemId};
use leptos::prelude::*;
use leptos::task::spawn_local;

type Notice = WriteSignal<Option<(String, bool)>>; // 消息内容, 是否出错

// =========================================================
// 异步流程
// =========================================================
//
// 模型可能在请求途中被销毁（切换页面），所有写回都走 `try_update`，
// 信号已释放时直接丢弃结果。

async fn refresh(model: RwSignal<DashboardModel>, api: &ItemsApi<FetchHttpClient>, token: &AuthToken) {
    let Some(ticket) = model.try_update(|m| m.begin_refresh()) else {
        return;
    };
    let result = api.list(token).await;
    let _ = model.try_update(|m| m.finish_refresh(ticket, result));
}

async fn submit(
    model: RwSignal<DashboardModel>,
    api: ItemsApi<FetchHttpClient>,
    token: AuthToken,
    notice: Notice,
) {
    // 校验失败时错误已经写进模型
    let Some(Ok(plan)) = model.try_update(|m| m.begin_submit()) else {
        return;
    };
    let result = plan.run(&api, &token).await;
    let message = match &result {
        Ok(()) => ("Item saved".to_string(), false),
        Err(e) => (e.user_message(), true),
    };
    let needs_refresh = model.try_update(|m| m.finish_submit(result));
    let _ = notice.try_set(Some(message));
    if needs_refresh == Some(true) {
        refresh(model, &api, &token).await;
    }
}

async fn delete(
    model: RwSignal<DashboardModel>,
    api: ItemsApi<FetchHttpClient>,
    token: AuthToken,
    id: ItemId,
    notice: Notice,
) {
    let result = api.delete(&token, id).await;
    let message = match &result {
        Ok(()) => ("Item deleted".to_string(), false),
        Err(e) => (e.user_message(), true),
    };
    let applied = model.try_update(|m| m.finish_delete(id, result));
    let _ = notice.try_set(Some(message));
    // 无论删除成功与否都重新拉取
    if applied == Some(true) {
        refresh(model, &api, &token).await;
    }
}

// =========================================================
// 页面
// =========================================================

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let services = use_services();
    let api = StoredValue::new(services.items.clone());
    let model = RwSignal::new(DashboardModel::new(services.config.page_size));
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let load_items = move || {
        if let Some(token) = auth.token() {
            let api = api.get_value();
            spawn_local(async move { refresh(model, &api, &token).await });
        }
    };

    // 挂载时拉取一次
    load_items();

    on_cleanup(move || {
        let _ = model.try_update(|m| m.dispose());
    });

    let handle_submit = move |_: ()| {
        if let Some(token) = auth.token() {
            spawn_local(submit(model, api.get_value(), token, set_notification));
        }
    };

    let handle_cancel = move |_: ()| model.update(|m| m.cancel_edit());

    let handle_edit = move |id: ItemId| {
        model.update(|m| {
            m.edit_by_id(id);
        });
    };

    let handle_delete = move |id: ItemId| {
        if let Some(token) = auth.token() {
            spawn_local(delete(model, api.get_value(), token, id, set_notification));
        }
    };

    let on_logout = move |_| logout(&auth);

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || {
                    let _ = set_notification.try_set(None);
                },
                std::time::Duration::from_secs(3),
            );
        }
    });

    let is_loading = move || model.with(|m| m.is_loading());
    let is_empty = move || model.with(|m| m.items().is_empty());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-8">
                // 通知提示框
                {move || notification.get().map(|(msg, is_err)| view! {
                    <div class="toast toast-top toast-end z-50">
                        <div class={if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }}>
                            <span>{msg}</span>
                        </div>
                    </div>
                })}

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1">
                        <a class="btn btn-ghost text-xl">"Dashboard"</a>
                    </div>
                    <div class="flex-none gap-2">
                        <button
                            on:click=move |_| load_items()
                            disabled=is_loading
                            class="btn btn-ghost"
                        >
                            {move || if is_loading() { "Loading..." } else { "Refresh" }}
                        </button>
                        <button on:click=on_logout class="btn btn-outline btn-error">"Logout"</button>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <ItemEditor model=model on_submit=handle_submit on_cancel=handle_cancel />
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Your items"</h3>

                        <Show when=move || is_empty() && !is_loading()>
                            <p class="text-center py-8 text-base-content/50">"No items yet."</p>
                        </Show>

                        <ul class="divide-y divide-base-200">
                            <For
                                each=move || model.with(|m| m.visible_items().to_vec())
                                key=|item| item.clone()
                                children=move |item| view! {
                                    <ItemRow item=item on_edit=handle_edit on_delete=handle_delete />
                                }
                            />
                        </ul>

                        <Pager model=model />
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ItemRow(
    item: Item,
    #[prop(into)] on_edit: Callback<ItemId>,
    #[prop(into)] on_delete: Callback<ItemId>,
) -> impl IntoView {
    let id = item.id;
    let alt = item.name.clone();
    let cost_per_day = item
        .cost_per_day
        .map(|cost| cost.to_string())
        .unwrap_or_else(|| "-".to_string());

    view! {
        <li class="flex items-center gap-4 py-3">
            {item.image.map(|src| view! {
                <img src=src alt=alt class="w-16 h-16 object-cover rounded" />
            })}
            <div class="flex-1">
                <p class="font-semibold">{item.name}</p>
                <p class="text-sm">
                    {item.price.to_string()} " · bought " {item.purchase_date.to_string()}
                </p>
                <p class="text-sm text-base-content/70">"Cost per day: " {cost_per_day}</p>
            </div>
            <button class="btn btn-sm btn-ghost" on:click=move |_| on_edit.run(id)>"Edit"</button>
            <button class="btn btn-sm btn-error btn-outline" on:click=move |_| on_delete.run(id)>
                "Delete"
            </button>
        </li>
    }
}

/// 分页控件，只在多于一页时显示
#[component]
fn Pager(model: RwSignal<DashboardModel>) -> impl IntoView {
    let page_count = move || model.with(|m| m.page_count());
    let current = move || model.with(|m| m.pagination().current_page());

    view! {
        <Show when=move || { page_count() > 1 }>
            <div class="join justify-center mt-4">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || model.with(|m| !m.pagination().has_previous())
                    on:click=move |_| model.update(|m| m.previous_page())
                >
                    "«"
                </button>
                <button class="join-item btn btn-sm btn-disabled">
                    {move || format!("Page {} of {}", current(), page_count())}
                </button>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || model.with(|m| !m.has_next_page())
                    on:click=move |_| model.update(|m| m.next_page())
                >
                    "»"
                </button>
            </div>
        </Show>
    }
}
