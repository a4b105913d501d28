use std::cell::RefCell;

use shared::TransactionDetail;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew::AppHandle;

use crate::services::{dom, Logger};

const COMPONENT: &str = "transaction_modal";
const TITLE_ID: &str = "transactionDetailTitle";
const MODAL_OPEN_CLASS: &str = "modal-open";

#[derive(Properties, PartialEq)]
pub struct TransactionModalProps {
    pub detail: TransactionDetail,
}

// Bootstrap locks page scrolling while a modal is shown
fn mark_body_modal_open(open: bool) {
    let Some(body) = dom::document().and_then(|doc| doc.body()) else {
        return;
    };
    if let Err(e) = body.class_list().toggle_with_force(MODAL_OPEN_CLASS, open) {
        Logger::debug_with_component(COMPONENT, &format!("body class not updated: {:?}", e));
    }
}

/// Bootstrap modal listing the transactions of one calendar day
#[function_component(TransactionModal)]
pub fn transaction_modal(props: &TransactionModalProps) -> Html {
    let is_open = use_state(|| true);

    use_effect_with(*is_open, |open| {
        mark_body_modal_open(*open);
        || mark_body_modal_open(false)
    });

    // Clicks outside the dialog land on the `.modal` layer itself
    let on_backdrop_click = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            is_open.set(false);
        })
    };

    let on_dialog_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| {
            is_open.set(false);
        })
    };

    if !*is_open {
        return html! {};
    }

    let detail = &props.detail;

    html! {
        <>
            <div
                class="modal fade show d-block"
                tabindex="-1"
                role="dialog"
                aria-modal="true"
                aria-labelledby={TITLE_ID}
                onclick={on_backdrop_click}
            >
                <div class="modal-dialog modal-lg modal-dialog-scrollable" onclick={on_dialog_click}>
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title" id={TITLE_ID}>{&detail.title}</h5>
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                onclick={on_close_click.clone()}
                            ></button>
                        </div>

                        <div class="modal-body">
                            <div class="table-responsive">
                                <table class="table table-striped">
                                    <thead>
                                        <tr>
                                            {for detail.headers.iter().map(|header| html! { <th>{header}</th> })}
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {for detail.rows.iter().map(|row| html! {
                                            <tr class={row.kind.row_class()}>
                                                <td>{&row.kind_label}</td>
                                                <td>{&row.category}</td>
                                                <td>{&row.amount}</td>
                                                <td>{&row.description}</td>
                                            </tr>
                                        })}
                                    </tbody>
                                </table>
                            </div>
                        </div>

                        <div class="modal-footer">
                            <button type="button" class="btn btn-secondary" onclick={on_close_click}>
                                {"Tutup"}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop fade show"></div>
        </>
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<AppHandle<TransactionModal>>> = const { RefCell::new(None) };
}

/// Mount the overlay into the host element, replacing any open one.
pub fn open(detail: TransactionDetail, host_id: &str) -> anyhow::Result<()> {
    let host = dom::ensure_host(host_id)
        .ok_or_else(|| anyhow::anyhow!("cannot find or create overlay host #{}", host_id))?;

    MOUNTED.with(|mounted| {
        if let Some(previous) = mounted.borrow_mut().take() {
            previous.destroy();
        }
        let handle = yew::Renderer::<TransactionModal>::with_root_and_props(
            host,
            TransactionModalProps { detail },
        )
        .render();
        *mounted.borrow_mut() = Some(handle);
    });

    Ok(())
}
