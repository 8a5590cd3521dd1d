//! Static per-system display metadata.
//!
//! Pure configuration: names, dimension labels and expert templates for every
//! process the assistant knows about.

/// Data template handed to expert-mode users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Path of the template file as served to the front-end.
    pub file: &'static str,
    /// File name suggested for the download.
    pub download_name: &'static str,
}

/// Entry on the business-case selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    pub title: &'static str,
    pub description: &'static str,
}

/// Metadata of one process/system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub dimensions: &'static [&'static str],
    pub listing: Option<Listing>,
    pub template: Option<Template>,
}

const LEGACY_TAKEOVER_TEMPLATE: Template = Template {
    file: "/Plantilla_Legacy_TakeOver.txt",
    download_name: "template_legacy_takeover.txt",
};

pub static SYSTEMS: &[SystemDescriptor] = &[
    SystemDescriptor {
        id: "order_to_cash",
        display_name: "Agentic Order to Cash",
        dimensions: &[
            "Savings in Collection Management Costs",
            "Reducing Errors in Billing and Processing",
            "Improved Collection Speed and DSO Reduction",
            "Optimizing Order Processing and Billing",
            "Reduction in Dispute Management and Reconciliation",
            "Improved Customer Experience and Retention",
        ],
        listing: Some(Listing {
            title: "Order to Cash",
            description: "Streamline O2C",
        }),
        template: Some(Template {
            file: "/Plantilla_Order_To_Cash.txt",
            download_name: "template_order_to_cash.txt",
        }),
    },
    SystemDescriptor {
        id: "customer_support",
        display_name: "Agentic Customer Support",
        dimensions: &[
            "Cost for Delay in Case Handling",
            "Cost for Case Recurrence",
            "Operational Cost",
            "Cost for Poor Quality",
        ],
        listing: Some(Listing {
            title: "Customer Support",
            description: "AI-powered support",
        }),
        template: Some(Template {
            file: "/Plantilla_Customer_Support.txt",
            download_name: "template_customer_support.txt",
        }),
    },
    SystemDescriptor {
        id: "customer_support_automation",
        display_name: "Customer Support Automation",
        dimensions: &[],
        listing: Some(Listing {
            title: "Customer Support Automation",
            description: "Automate support operations",
        }),
        template: Some(Template {
            file: "/Plantilla_Customer_Support_Automation.txt",
            download_name: "template_customer_support_automation.txt",
        }),
    },
    SystemDescriptor {
        id: "legal_and_compliance",
        display_name: "Legal & Compliance",
        dimensions: &[
            "Operational Efficiency",
            "Legal Consulting Cost Reduction",
            "Compliance and Risk Mitigation",
            "Certification and Audit Speed",
            "Talent Productivity and Utilization",
            "Quality, Security and Traceability",
        ],
        listing: Some(Listing {
            title: "Legal & Compliance",
            description: "Automated compliance",
        }),
        template: Some(Template {
            file: "/Plantilla_Legal_And_Compliance.txt",
            download_name: "template_legal_and_compliance.txt",
        }),
    },
    SystemDescriptor {
        id: "cost_to_hire",
        display_name: "Cost to Hire",
        dimensions: &[
            "Savings in Operational Work Costs",
            "Acceleration of Time to Hire",
            "Improvement in Hiring Quality",
            "Savings in External Hiring Costs",
            "Savings from Improved Candidate Experience",
            "Efficiency in Evaluation and Interviews",
        ],
        listing: Some(Listing {
            title: "Cost to Hire",
            description: "Optimize hiring costs",
        }),
        template: Some(Template {
            file: "/Plantilla_Cost_To_Hire.txt",
            download_name: "template_cost_to_hire.txt",
        }),
    },
    SystemDescriptor {
        id: "legacy_takeover",
        display_name: "Legacy Takeover",
        dimensions: &[
            "Development and Maintenance Efficiency",
            "Software Quality",
            "Delivery Speed",
            "Operational Costs",
            "Satisfaction and Value",
            "Innovation and Scalability",
        ],
        listing: Some(Listing {
            title: "Legacy Takeover",
            description: "Modernize legacy systems",
        }),
        template: Some(LEGACY_TAKEOVER_TEMPLATE),
    },
    SystemDescriptor {
        id: "real_time_insights",
        display_name: "Real Time Insights",
        dimensions: &[
            "Operation and Maintenance Cost (O&M)",
            "Labor Costs",
            "Inventory Loss Cost (Shrinkage)",
            "Technology and IT Support Cost",
            "Supply Chain and Logistics Cost",
            "Financial Friction and Insurance Cost",
        ],
        listing: Some(Listing {
            title: "Real Time Insights",
            description: "Real-time business insights",
        }),
        template: Some(Template {
            file: "/Plantilla_Real_Time_Insights.txt",
            download_name: "template_real_time_insights.txt",
        }),
    },
    SystemDescriptor {
        id: "compliance",
        display_name: "Contract Management Compliance",
        dimensions: &[
            "Compliance Rate",
            "Risk Reduction",
            "Audit Efficiency",
            "Contract Accuracy",
            "Process Speed",
            "Cost Savings",
        ],
        listing: None,
        template: None,
    },
    SystemDescriptor {
        id: "physical-ai",
        display_name: "Physical AI",
        dimensions: &[
            "Automation Level",
            "Safety Score",
            "Efficiency Gain",
            "Downtime Reduction",
            "Quality Improvement",
            "Maintenance Cost",
        ],
        listing: None,
        template: None,
    },
    SystemDescriptor {
        id: "web-takeover",
        display_name: "Web Interface Takeover",
        dimensions: &[
            "Task Completion Rate",
            "Speed Improvement",
            "Error Reduction",
            "User Experience",
            "Integration Complexity",
            "Maintenance Effort",
        ],
        listing: None,
        template: None,
    },
    SystemDescriptor {
        id: "insights",
        display_name: "Real Time Insights",
        dimensions: &[
            "Data Accuracy",
            "Processing Speed",
            "Decision Impact",
            "System Integration",
            "User Adoption",
            "ROI Visibility",
        ],
        listing: None,
        template: None,
    },
    SystemDescriptor {
        id: "order-to-cash",
        display_name: "Agentic Order to Cash",
        dimensions: &[
            "Customer Satisfaction",
            "Delivery Time",
            "Net Promoter Score",
            "Human Labor Cost",
            "Revenue Increment",
            "Human Error",
        ],
        listing: None,
        template: None,
    },
];

pub fn find(id: &str) -> Option<&'static SystemDescriptor> {
    SYSTEMS.iter().find(|s| s.id == id)
}

/// Display name for a system id, falling back to the id itself.
pub fn display_name(id: &str) -> &str {
    find(id).map(|s| s.display_name).unwrap_or(id)
}

/// Systems offered on the business-case selection list, in display order.
pub fn listed() -> impl Iterator<Item = (&'static SystemDescriptor, Listing)> {
    SYSTEMS
        .iter()
        .filter_map(|s| s.listing.map(|listing| (s, listing)))
}

/// Expert template for a system, defaulting to the legacy takeover one.
pub fn template_for(id: &str) -> Template {
    find(id)
        .and_then(|s| s.template)
        .unwrap_or(LEGACY_TAKEOVER_TEMPLATE)
}
