pub mod models;
pub mod query;
pub mod repo;
pub mod routes;
pub mod stats;
pub mod validate;

use async_trait::async_trait;
use axum::Router;
use bookstack_db::Store;
use bookstack_kernel::{InitCtx, Module};
use serde_json::json;

use repo::BookRepo;

/// Books module: inventory CRUD plus the filtered listing with statistics
pub struct BooksModule {
    repo: BookRepo,
}

impl BooksModule {
    pub fn new(store: &Store) -> Self {
        Self {
            repo: BookRepo::new(store),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repo.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books with filters and statistics",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "search",
                                "in": "query",
                                "description": "Case-insensitive substring matched against title, author, or genre",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "genre",
                                "in": "query",
                                "description": "Case-insensitive substring matched against genre",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "author",
                                "in": "query",
                                "description": "Case-insensitive substring matched against author",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "sortBy",
                                "in": "query",
                                "description": "Field to sort by, defaults to createdAt",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "sortOrder",
                                "in": "query",
                                "description": "asc or desc, defaults to desc",
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Filtered books with aggregate statistics",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookListResponse"
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/CreateBook"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created book with assigned id and createdAt",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Update a book (partial)",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/UpdateBook"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Validation error or malformed id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Deletion confirmation with the removed book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/DeleteResponse"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Unique identifier for the book"
                            },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "price": {
                                "type": "number",
                                "minimum": 0
                            },
                            "stock": {
                                "type": "integer",
                                "minimum": 0
                            },
                            "publishedYear": { "type": "integer" },
                            "createdAt": {
                                "type": "string",
                                "format": "date-time"
                            }
                        },
                        "required": ["id", "title", "author", "genre", "price", "stock", "createdAt"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "price": {
                                "type": "number",
                                "minimum": 0
                            },
                            "stock": {
                                "type": "integer",
                                "minimum": 0,
                                "default": 0
                            },
                            "publishedYear": { "type": "integer" }
                        },
                        "required": ["title", "author", "genre", "price"]
                    },
                    "UpdateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "price": {
                                "type": "number",
                                "minimum": 0
                            },
                            "stock": {
                                "type": "integer",
                                "minimum": 0
                            },
                            "publishedYear": { "type": "integer" }
                        }
                    },
                    "Statistics": {
                        "type": "object",
                        "properties": {
                            "totalBooks": { "type": "integer" },
                            "outOfStockBooks": { "type": "integer" },
                            "totalValue": {
                                "type": "string",
                                "description": "Sum of price * stock over the returned books, two decimal places"
                            }
                        },
                        "required": ["totalBooks", "outOfStockBooks", "totalValue"]
                    },
                    "BookListResponse": {
                        "type": "object",
                        "properties": {
                            "books": {
                                "type": "array",
                                "items": {
                                    "$ref": "#/components/schemas/Book"
                                }
                            },
                            "statistics": {
                                "$ref": "#/components/schemas/Statistics"
                            }
                        },
                        "required": ["books", "statistics"]
                    },
                    "DeleteResponse": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "book": {
                                "$ref": "#/components/schemas/Book"
                            }
                        },
                        "required": ["message", "book"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module backed by the given store
pub fn create_module(store: &Store) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(store))
}
