//! The root of the UI: controller, add form and a transport wired together.
//!
//! `TodoPage` plays the user's side of the protocol. Each action runs one
//! request through the transport to completion before returning, so callers
//! see the state after the response has been applied.

use tracing::debug;
use uuid::Uuid;

use crate::client::TodoClient;
use crate::controller::{ListController, Pending, Settled, Snapshot};
use crate::form::AddForm;
use crate::http::Transport;
use crate::view::{self, PageOptions};

pub struct TodoPage<T> {
    controller: ListController,
    form: AddForm,
    transport: T,
    options: PageOptions,
}

impl<T: Transport> TodoPage<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            controller: ListController::new(client),
            form: AddForm::new(),
            transport,
            options: PageOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    pub fn form(&self) -> &AddForm {
        &self.form
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.controller.snapshot()
    }

    fn run(&mut self, pending: Pending) -> Settled {
        let outcome = self.transport.execute(pending.request);
        let settled = self.controller.complete(pending.ticket, outcome);
        debug!(?settled, "request settled");
        settled
    }

    pub fn mount(&mut self) -> Settled {
        let pending = self.controller.mount();
        self.run(pending)
    }

    pub fn refresh(&mut self) -> Settled {
        let pending = self.controller.refresh();
        self.run(pending)
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
        self.form = AddForm::new();
    }

    /// Type into the title input.
    pub fn type_title(&mut self, text: &str) {
        self.form.edit(text);
    }

    /// Submit the add form. `None` when the submission was blocked locally
    /// and no request was made.
    pub fn submit(&mut self) -> Option<Settled> {
        if self.controller.is_adding() {
            return None;
        }
        let title = self.form.submit()?;
        let settled = match self.controller.begin_add(title) {
            Ok(pending) => self.run(pending),
            Err(err) => Settled::AddFailed(err),
        };
        match &settled {
            Settled::Added(_) => self.form.succeeded(),
            Settled::AddFailed(err) => {
                debug!(message = %err.message(), "add failed");
                self.form.failed();
            }
            _ => {}
        }
        Some(settled)
    }

    pub fn toggle(&mut self, id: Uuid) -> Settled {
        let pending = self.controller.begin_toggle(id);
        self.run(pending)
    }

    pub fn delete(&mut self, id: Uuid) -> Settled {
        let pending = self.controller.begin_delete(id);
        self.run(pending)
    }

    pub fn copy(&mut self, id: Uuid) -> Settled {
        let pending = self.controller.begin_copy(id);
        self.run(pending)
    }

    pub fn render(&self) -> String {
        view::render_page(&self.controller.snapshot(), &self.form, &self.options)
    }
}
