//! 物品表单组件
//!
//! 直接读写视图模型里的草稿；是否处于编辑模式由草稿的 `editing_id` 决定。

use crate::web::file::{read_upload, selected_file};
use costwise::DashboardModel;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ItemEditor(
    model: RwSignal<DashboardModel>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let file_ref = NodeRef::<leptos::html::Input>::new();

    let is_editing = move || model.with(|m| m.draft().is_editing());
    let is_submitting = move || model.with(|m| m.is_submitting());

    // 草稿被清空后同步清掉文件输入框
    Effect::new(move |_| {
        if model.with(|m| m.draft().image.is_none()) {
            if let Some(input) = file_ref.get() {
                input.set_value("");
            }
        }
    });

    let on_image_change = move |ev: leptos::web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            model.update(|m| m.draft_mut().image = None);
            return;
        };
        spawn_local(async move {
            match read_upload(file).await {
                Ok(upload) => {
                    let _ = model.try_update(|m| m.draft_mut().image = Some(upload));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "image not attached");
                    let _ = model.try_update(|m| m.reject_draft(format!("Could not read image: {e}")));
                }
            }
        });
    };

    view! {
        <form
            class="card-body"
            on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <h3 class="card-title">
                {move || if is_editing() { "Edit item" } else { "Add item" }}
            </h3>

            {move || model.with(|m| m.error_message()).map(|msg| view! {
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{msg}</span>
                </div>
            })}

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <div class="form-control">
                    <label for="item_name" class="label">
                        <span class="label-text">"Name"</span>
                    </label>
                    <input id="item_name" required
                        type="text"
                        placeholder="Lamp"
                        on:input=move |ev| model.update(|m| m.draft_mut().name = event_target_value(&ev))
                        prop:value=move || model.with(|m| m.draft().name.clone())
                        class="input input-bordered w-full"
                    />
                </div>
                <div class="form-control">
                    <label for="item_price" class="label">
                        <span class="label-text">"Price (£)"</span>
                    </label>
                    <input id="item_price" required
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="12.50"
                        on:input=move |ev| model.update(|m| m.draft_mut().price = event_target_value(&ev))
                        prop:value=move || model.with(|m| m.draft().price.clone())
                        class="input input-bordered w-full"
                    />
                </div>
                <div class="form-control">
                    <label for="item_purchase_date" class="label">
                        <span class="label-text">"Purchase date"</span>
                    </label>
                    <input id="item_purchase_date" required
                        type="date"
                        on:input=move |ev| {
                            model.update(|m| m.draft_mut().purchase_date = event_target_value(&ev))
                        }
                        prop:value=move || model.with(|m| m.draft().purchase_date.clone())
                        class="input input-bordered w-full"
                    />
                </div>
            </div>

            <div class="form-control">
                <label for="item_image" class="label">
                    <span class="label-text">"Image (optional)"</span>
                </label>
                <input id="item_image"
                    type="file"
                    accept="image/*"
                    node_ref=file_ref
                    on:change=on_image_change
                    class="file-input file-input-bordered w-full"
                />
            </div>

            <div class="card-actions justify-end mt-4">
                <Show when=is_editing>
                    <button type="button" class="btn btn-ghost" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                </Show>
                <button type="submit" class="btn btn-primary" disabled=is_submitting>
                    {move || match (is_submitting(), is_editing()) {
                        (true, _) => view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any(),
                        (false, true) => "Update item".into_any(),
                        (false, false) => "Add item".into_any(),
                    }}
                </button>
            </div>
        </form>
    }
}
